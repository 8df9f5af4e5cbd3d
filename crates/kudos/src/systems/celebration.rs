//! Star celebration: the awarded star flies from its corner slot to the
//! centre of the canvas, pops with a label and a particle burst, then flies
//! back. A large ephemeral star does the flying; the persistent slot only
//! has its fill pinned to 1.0.
//!
//! Phases: `FlyIn → Celebrate → FlyOut`, idle when no sequence exists.

use glam::Vec2;
use crate::api::config::FeedbackConfig;
use crate::api::context::FeedbackContext;
use crate::api::types::{DisplayId, FeedbackEvent, StarId};
use crate::components::display::DisplayKind;
use crate::extensions::easing::{Easing, ease, ease_vec2, progress};
use crate::extensions::tween::Tween;
use super::fill::FillAnimator;
use super::popup::{self, CELEBRATION_LABEL_SIZE, CELEBRATION_MIN_FONT_SIZE};
use super::praise::pick_audio;
use super::registry::StarRegistry;

/// How long the centre celebration is held after the star's pop, in seconds.
pub const CELEBRATE_HOLD: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationPhase {
    FlyIn,
    Celebrate,
    FlyOut,
}

/// Transient state of one running celebration.
#[derive(Debug, Clone)]
pub struct CelebrationSequence {
    /// Registry star being celebrated; `None` when the registry had no room.
    pub target: Option<StarId>,
    pub phase: CelebrationPhase,
    /// Seconds spent in the current phase.
    pub elapsed: f32,
    corner: Vec2,
    center: Vec2,
    small_scale: f32,
    moving: DisplayId,
    particle: Option<DisplayId>,
    label: Option<DisplayId>,
}

impl CelebrationSequence {
    fn objects(&self) -> impl Iterator<Item = DisplayId> {
        std::iter::once(self.moving).chain(self.particle).chain(self.label)
    }

    fn place_moving(&self, ctx: &mut FeedbackContext, from: Vec2, to: Vec2, from_scale: f32, to_scale: f32, t: f32) {
        if let Some(star) = ctx.arena.get_mut(self.moving) {
            star.pos = ease_vec2(from, to, t, Easing::SmoothStep);
            star.scale = ease(from_scale, to_scale, t, Easing::SmoothStep);
        }
    }

    fn enter_celebrate(&mut self, ctx: &mut FeedbackContext, config: &FeedbackConfig) {
        self.place_moving(ctx, self.corner, self.center, self.small_scale, 1.0, 1.0);
        self.phase = CelebrationPhase::Celebrate;

        self.particle = popup::spawn_particle(ctx, config, self.center, Some(self.moving));
        let label_pos = self.center + Vec2::new(0.0, -config.large_star_size.y * 0.6);
        self.label = Some(popup::spawn_label(
            ctx,
            config,
            &config.celebration_text,
            label_pos,
            0.0,
            CELEBRATION_LABEL_SIZE,
            CELEBRATION_MIN_FONT_SIZE,
        ));

        let cue = pick_audio(
            config.celebration_audio_index,
            config.praise_phrases.len(),
            &config.praise_audio,
            &mut ctx.rng,
        );
        if let Some(cue) = cue {
            ctx.emit_sound(cue);
        }

        ctx.tweens.replace(
            self.moving,
            Tween::pop(1.0, config.flash_scale, 1.0, config.flash_duration * 0.5),
        );
    }

    fn enter_fly_out(&mut self, ctx: &mut FeedbackContext, config: &FeedbackConfig) {
        for id in self.particle.into_iter().chain(self.label) {
            popup::vanish(ctx, config, id);
        }
        ctx.tweens.remove_object(self.moving);
        if let Some(star) = ctx.arena.get_mut(self.moving) {
            star.scale = 1.0;
        }
        self.phase = CelebrationPhase::FlyOut;
    }
}

/// Owner of the (at most one) running celebration.
#[derive(Debug, Default)]
pub struct Celebration {
    active: Option<CelebrationSequence>,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Current phase, `None` when idle.
    pub fn phase(&self) -> Option<CelebrationPhase> {
        self.active.as_ref().map(|seq| seq.phase)
    }

    pub fn sequence(&self) -> Option<&CelebrationSequence> {
        self.active.as_ref()
    }

    /// Begin celebrating the most recent star. `anchor` is the star
    /// container's canvas position. Returns `false` if one is already running.
    pub fn start(
        &mut self,
        ctx: &mut FeedbackContext,
        config: &FeedbackConfig,
        registry: &mut StarRegistry,
        fills: &mut FillAnimator,
        anchor: Vec2,
        center: Vec2,
    ) -> bool {
        if self.active.is_some() {
            log::debug!("celebration already running, trigger ignored");
            return false;
        }

        let target = match registry.last_star().map(|star| star.id) {
            Some(id) => Some(id),
            None => {
                log::debug!("no star to celebrate, adding a filled one");
                registry.add_filled_star()
            }
        };

        let corner = match target {
            Some(id) => {
                fills.cancel_star(id);
                match registry.get_mut(id) {
                    Some(star) => {
                        star.fill = 1.0;
                        anchor + star.pos
                    }
                    None => anchor + registry.layout().corner(),
                }
            }
            None => {
                log::warn!("star registry has no capacity, celebrating without a slot");
                anchor + registry.layout().corner()
            }
        };

        let small_scale = config.small_to_large();
        let moving = ctx.arena.spawn_with(DisplayKind::Star, |o| {
            o.with_pos(corner).with_size(config.large_star_size).with_scale(small_scale)
        });

        let star_code = target.map_or(-1.0, |id| id.0 as f32);
        ctx.emit_event(FeedbackEvent::new(FeedbackEvent::CELEBRATION_STARTED, star_code, corner.x, corner.y));
        log::info!("celebrating star {:?}", target);

        self.active = Some(CelebrationSequence {
            target,
            phase: CelebrationPhase::FlyIn,
            elapsed: 0.0,
            corner,
            center,
            small_scale,
            moving,
            particle: None,
            label: None,
        });
        true
    }

    /// Advance the running sequence. Returns `true` on the tick it finishes.
    pub fn tick(
        &mut self,
        dt: f32,
        ctx: &mut FeedbackContext,
        config: &FeedbackConfig,
        registry: &mut StarRegistry,
    ) -> bool {
        let Some(seq) = self.active.as_mut() else {
            return false;
        };

        let half = config.move_duration * 0.5;
        let hold = config.flash_duration * 0.5 + CELEBRATE_HOLD;
        seq.elapsed += dt;

        loop {
            match seq.phase {
                CelebrationPhase::FlyIn => {
                    let t = progress(seq.elapsed, half);
                    seq.place_moving(ctx, seq.corner, seq.center, seq.small_scale, 1.0, t);
                    if seq.elapsed < half {
                        return false;
                    }
                    seq.elapsed -= half;
                    seq.enter_celebrate(ctx, config);
                }
                CelebrationPhase::Celebrate => {
                    if seq.elapsed < hold {
                        return false;
                    }
                    seq.elapsed -= hold;
                    seq.enter_fly_out(ctx, config);
                }
                CelebrationPhase::FlyOut => {
                    let t = progress(seq.elapsed, half);
                    seq.place_moving(ctx, seq.center, seq.corner, 1.0, seq.small_scale, t);
                    if seq.elapsed < half {
                        return false;
                    }
                    break;
                }
            }
        }

        if let Some(seq) = self.active.take() {
            let star_code = seq.target.map_or(-1.0, |id| id.0 as f32);
            Self::release(seq, ctx, registry);
            ctx.emit_event(FeedbackEvent::new(FeedbackEvent::CELEBRATION_FINISHED, star_code, 0.0, 0.0));
        }
        true
    }

    /// Stop immediately, removing everything the sequence spawned.
    pub fn abort(&mut self, ctx: &mut FeedbackContext, registry: &mut StarRegistry) {
        if let Some(seq) = self.active.take() {
            log::debug!("celebration aborted in {:?}", seq.phase);
            Self::release(seq, ctx, registry);
        }
    }

    fn release(seq: CelebrationSequence, ctx: &mut FeedbackContext, registry: &mut StarRegistry) {
        for id in seq.objects() {
            ctx.release(id);
        }
        if let Some(star) = seq.target.and_then(|id| registry.get_mut(id)) {
            star.fill = 1.0;
        }
    }
}
