//! Automatic praise popups.
//!
//! A repeating timer (first fire after one full interval) drops a random
//! phrase, optionally with a particle burst and a voice line, at a random
//! point inside one of the configured spawn regions.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::config::FeedbackConfig;
use crate::api::context::FeedbackContext;
use crate::api::types::{AudioCue, DisplayId, FeedbackEvent};
use crate::components::canvas::Canvas;
use crate::core::time::IntervalTimer;
use super::popup::{self, PRAISE_LABEL_SIZE, PRAISE_MIN_FONT_SIZE};
use super::rng::Rng;

/// Rectangle in normalized canvas space (`(0,0)` bottom-left, `(1,1)` top-right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl SpawnRegion {
    /// The whole canvas.
    pub const FULL: SpawnRegion = SpawnRegion {
        min: Vec2::ZERO,
        max: Vec2::ONE,
    };

    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Corners of the region in canvas-local coordinates.
    pub fn to_canvas(&self, canvas: &Canvas) -> (Vec2, Vec2) {
        (canvas.from_normalized(self.min), canvas.from_normalized(self.max))
    }
}

/// Uniform point inside `[min, max]` inset by `padding` on each axis.
/// An axis whose padding would invert the range falls back to the unpadded range.
pub fn random_point(min: Vec2, max: Vec2, padding: Vec2, rng: &mut Rng) -> Vec2 {
    fn axis(lo: f32, hi: f32, pad: f32, rng: &mut Rng) -> f32 {
        if lo + pad <= hi - pad {
            rng.range_f32(lo + pad, hi - pad)
        } else {
            rng.range_f32(lo, hi)
        }
    }
    let x = axis(min.x, max.x, padding.x, rng);
    let y = axis(min.y, max.y, padding.y, rng);
    Vec2::new(x, y)
}

/// Voice line for a phrase: the paired clip when the lists line up,
/// otherwise any clip.
pub fn pick_audio(phrase_index: usize, phrase_count: usize, clips: &[u32], rng: &mut Rng) -> Option<AudioCue> {
    if clips.is_empty() {
        return None;
    }
    if clips.len() == phrase_count && phrase_index < clips.len() {
        return Some(AudioCue(clips[phrase_index]));
    }
    Some(AudioCue(clips[rng.index(clips.len())]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PraiseStage {
    /// Popped in, waiting out `praise_duration`.
    Showing,
    /// Shrinking away; removed once its objects are gone.
    Vanishing,
}

/// One live praise popup.
#[derive(Debug, Clone)]
pub struct PraiseEvent {
    pub phrase: String,
    pub phrase_index: usize,
    /// Index into `spawn_regions`.
    pub region: usize,
    pub pos: Vec2,
    pub elapsed: f32,
    pub stage: PraiseStage,
    pub text: DisplayId,
    pub particle: Option<DisplayId>,
}

impl PraiseEvent {
    fn objects(&self) -> impl Iterator<Item = DisplayId> {
        std::iter::once(self.text).chain(self.particle)
    }
}

/// Recurring praise spawner. Owns every popup it creates.
#[derive(Debug, Default)]
pub struct PraiseScheduler {
    timer: Option<IntervalTimer>,
    events: Vec<PraiseEvent>,
}

impl PraiseScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the timer. The first popup comes one interval later.
    pub fn start(&mut self, interval: f32) {
        self.timer = Some(IntervalTimer::new(interval));
        log::debug!("praise scheduler started, interval {:.2}s", interval);
    }

    /// Stop the timer and remove every popup still on screen.
    pub fn stop(&mut self, ctx: &mut FeedbackContext) {
        self.timer = None;
        for event in self.events.drain(..) {
            for id in event.objects() {
                ctx.release(id);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Age live popups, then fire the timer.
    pub fn tick(&mut self, dt: f32, ctx: &mut FeedbackContext, config: &FeedbackConfig, canvas: &Canvas) {
        self.age(dt, ctx, config);

        let fired = self.timer.as_mut().is_some_and(|timer| timer.accumulate(dt));
        if fired {
            self.spawn(ctx, config, canvas);
        }
    }

    fn age(&mut self, dt: f32, ctx: &mut FeedbackContext, config: &FeedbackConfig) {
        let lifetime = config.praise_duration.max(0.01);
        self.events.retain_mut(|event| {
            event.elapsed += dt;
            match event.stage {
                PraiseStage::Showing => {
                    if event.elapsed >= lifetime {
                        for id in event.objects() {
                            popup::vanish(ctx, config, id);
                        }
                        event.stage = PraiseStage::Vanishing;
                    }
                    true
                }
                PraiseStage::Vanishing => event.objects().any(|id| ctx.arena.contains(id)),
            }
        });
    }

    /// Spawn one popup now. Returns `None` when there is nothing to show.
    pub fn spawn(&mut self, ctx: &mut FeedbackContext, config: &FeedbackConfig, canvas: &Canvas) -> Option<&PraiseEvent> {
        if config.praise_phrases.is_empty() || config.spawn_regions.is_empty() {
            return None;
        }

        let region = ctx.rng.index(config.spawn_regions.len());
        let phrase_index = ctx.rng.index(config.praise_phrases.len());
        let phrase = config.praise_phrases[phrase_index].clone();

        if let Some(cue) = pick_audio(phrase_index, config.praise_phrases.len(), &config.praise_audio, &mut ctx.rng) {
            ctx.emit_sound(cue);
        }

        let (min, max) = config.spawn_regions[region].to_canvas(canvas);
        let pos = random_point(min, max, config.spawn_padding, &mut ctx.rng);
        let rotation = ctx.rng.range_f32(config.rotation_min, config.rotation_max).to_radians();

        // Particle first so it draws behind the text
        let particle = popup::spawn_particle(ctx, config, pos, None);
        let text = popup::spawn_label(ctx, config, &phrase, pos, rotation, PRAISE_LABEL_SIZE, PRAISE_MIN_FONT_SIZE);

        ctx.emit_event(FeedbackEvent::new(FeedbackEvent::PRAISE_SPAWNED, phrase_index as f32, pos.x, pos.y));
        log::debug!("praise '{}' at ({:.0}, {:.0})", phrase, pos.x, pos.y);

        self.events.push(PraiseEvent {
            phrase,
            phrase_index,
            region,
            pos,
            elapsed: 0.0,
            stage: PraiseStage::Showing,
            text,
            particle,
        });
        self.events.last()
    }

    /// Popups currently on screen.
    pub fn events(&self) -> &[PraiseEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(Vec2::new(1920.0, 1080.0))
    }

    fn config(interval: f32) -> FeedbackConfig {
        FeedbackConfig {
            praise_interval: interval,
            spawn_padding: Vec2::new(100.0, 50.0),
            ..Default::default()
        }
    }

    fn spawned(ctx: &FeedbackContext) -> usize {
        ctx.events
            .iter()
            .filter(|e| e.kind == FeedbackEvent::PRAISE_SPAWNED)
            .count()
    }

    #[test]
    fn fires_on_interval_boundaries_only() {
        let cfg = config(5.0);
        let mut ctx = FeedbackContext::default();
        let mut praise = PraiseScheduler::new();
        praise.start(cfg.praise_interval);

        let mut fire_times = Vec::new();
        for step in 1..=64 {
            ctx.clear_frame_data();
            praise.tick(0.25, &mut ctx, &cfg, &canvas());
            if spawned(&ctx) > 0 {
                fire_times.push(step as f32 * 0.25);
            }
        }
        assert_eq!(fire_times, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn stopping_prevents_next_fire() {
        let cfg = config(5.0);
        let mut ctx = FeedbackContext::default();
        let mut praise = PraiseScheduler::new();
        praise.start(cfg.praise_interval);

        let mut total = 0;
        for step in 1..=60 {
            if step == 29 {
                // t = 7s
                praise.stop(&mut ctx);
            }
            ctx.clear_frame_data();
            praise.tick(0.25, &mut ctx, &cfg, &canvas());
            total += spawned(&ctx);
        }
        assert_eq!(total, 1);
        assert!(!praise.is_running());
        assert!(ctx.arena.is_empty());
        assert!(ctx.tweens.is_empty());
    }

    #[test]
    fn popup_vanishes_after_duration() {
        let cfg = config(1.0);
        let mut ctx = FeedbackContext::default();
        let mut praise = PraiseScheduler::new();
        let canvas = canvas();

        praise.spawn(&mut ctx, &cfg, &canvas).unwrap();
        assert_eq!(ctx.arena.len(), 2);

        // Lifetime 1.0s, then 0.15s of shrinking
        for _ in 0..20 {
            praise.tick(0.1, &mut ctx, &cfg, &canvas);
            ctx.tweens.tick(0.1, &mut ctx.arena);
        }
        assert!(ctx.arena.is_empty());
        assert!(praise.events().is_empty());
    }

    #[test]
    fn empty_lists_are_a_no_op() {
        let mut ctx = FeedbackContext::default();
        let mut praise = PraiseScheduler::new();
        let no_phrases = FeedbackConfig {
            praise_phrases: Vec::new(),
            ..Default::default()
        };
        assert!(praise.spawn(&mut ctx, &no_phrases, &canvas()).is_none());

        let no_regions = FeedbackConfig {
            spawn_regions: Vec::new(),
            ..Default::default()
        };
        assert!(praise.spawn(&mut ctx, &no_regions, &canvas()).is_none());
        assert!(ctx.arena.is_empty());
        assert!(ctx.sounds.is_empty());
    }

    #[test]
    fn random_point_respects_padding() {
        let mut rng = Rng::new(11);
        let (w, h, p) = (400.0, 300.0, 60.0);
        for _ in 0..2000 {
            let pt = random_point(Vec2::ZERO, Vec2::new(w, h), Vec2::splat(p), &mut rng);
            assert!(pt.x >= p && pt.x <= w - p, "x out of range: {}", pt.x);
            assert!(pt.y >= p && pt.y <= h - p, "y out of range: {}", pt.y);
        }
    }

    #[test]
    fn oversized_padding_falls_back_per_axis() {
        let mut rng = Rng::new(3);
        for _ in 0..500 {
            let pt = random_point(Vec2::ZERO, Vec2::new(100.0, 400.0), Vec2::new(80.0, 10.0), &mut rng);
            assert!(pt.x >= 0.0 && pt.x <= 100.0);
            assert!(pt.y >= 10.0 && pt.y <= 390.0);
        }
    }

    #[test]
    fn spawn_stays_inside_region() {
        let canvas = canvas();
        let region = SpawnRegion::new(Vec2::new(0.5, 0.5), Vec2::new(1.0, 1.0));
        let cfg = FeedbackConfig {
            spawn_regions: vec![region],
            spawn_padding: Vec2::new(20.0, 20.0),
            particles: false,
            ..Default::default()
        };
        let mut ctx = FeedbackContext::default();
        let mut praise = PraiseScheduler::new();
        for _ in 0..50 {
            let event = praise.spawn(&mut ctx, &cfg, &canvas).unwrap();
            assert!(event.pos.x >= 20.0 && event.pos.x <= 940.0);
            assert!(event.pos.y >= 20.0 && event.pos.y <= 520.0);
            assert_eq!(event.region, 0);
        }
    }

    #[test]
    fn rotation_within_configured_range() {
        let canvas = canvas();
        let cfg = config(1.0);
        let mut ctx = FeedbackContext::default();
        let mut praise = PraiseScheduler::new();
        for _ in 0..50 {
            let text = praise.spawn(&mut ctx, &cfg, &canvas).unwrap().text;
            let rot = ctx.arena.get(text).unwrap().rotation.to_degrees();
            assert!(rot >= -35.001 && rot <= 35.001, "rotation {}", rot);
        }
    }

    #[test]
    fn audio_pairs_by_index_when_lengths_match() {
        let mut rng = Rng::new(1);
        assert_eq!(pick_audio(2, 3, &[10, 11, 12], &mut rng), Some(AudioCue(12)));
        assert_eq!(pick_audio(0, 3, &[], &mut rng), None);
        for _ in 0..50 {
            let cue = pick_audio(1, 4, &[7, 8], &mut rng).unwrap();
            assert!(cue == AudioCue(7) || cue == AudioCue(8));
        }
    }
}
