use glam::Vec2;
use crate::api::config::FeedbackConfig;
use crate::api::context::FeedbackContext;
use crate::api::source::AwardSource;
use crate::api::types::{AudioCue, FeedbackEvent, StarId};
use crate::components::canvas::Canvas;
use crate::core::arena::DisplayArena;
use crate::renderer::instance::DisplayBuffer;
use crate::systems::celebration::Celebration;
use crate::systems::fill::FillAnimator;
use crate::systems::praise::PraiseScheduler;
use crate::systems::rating::RatingBadge;
use crate::systems::registry::StarRegistry;
use crate::systems::render;

/// Top-level feedback state. The host drives it with `tick(dt)` once per
/// frame and reads back the display buffer, audio cues and events.
pub struct FeedbackCoordinator {
    config: FeedbackConfig,
    source: Box<dyn AwardSource>,
    canvas: Option<Canvas>,
    registry: StarRegistry,
    fills: FillAnimator,
    celebration: Celebration,
    praise: PraiseScheduler,
    rating: RatingBadge,
    ctx: FeedbackContext,
    active: bool,
}

impl FeedbackCoordinator {
    pub fn new(config: FeedbackConfig, source: Box<dyn AwardSource>) -> Self {
        let config = config.sanitized();
        Self {
            registry: StarRegistry::new(config.max_stars, config.layout),
            ctx: FeedbackContext::new(config.seed),
            config,
            source,
            canvas: None,
            fills: FillAnimator::new(),
            celebration: Celebration::new(),
            praise: PraiseScheduler::new(),
            rating: RatingBadge::new(),
            active: false,
        }
    }

    // -- Canvas --

    pub fn attach_canvas(&mut self, canvas: Canvas) {
        self.canvas = Some(canvas);
        if self.active {
            self.start_praise();
        }
    }

    /// Drop the canvas. Praise popups and a running celebration go with it.
    pub fn detach_canvas(&mut self) {
        self.canvas = None;
        self.praise.stop(&mut self.ctx);
        self.celebration.abort(&mut self.ctx, &mut self.registry);
    }

    // -- Lifecycle --

    /// Rebuild the stars from the award source and start the praise timer.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        log::info!("feedback activated");
        self.refresh_from_source();
        self.start_praise();
    }

    /// Cancel every running sequence and release every display object.
    /// Later ticks are ignored until the next `activate`.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.praise.stop(&mut self.ctx);
        self.fills.cancel_all();
        self.celebration.abort(&mut self.ctx, &mut self.registry);
        self.rating.stop(&mut self.ctx);
        self.ctx.tweens.clear();
        self.ctx.arena.clear();
        self.ctx.clear_frame_data();
        log::info!("feedback deactivated");
    }

    fn start_praise(&mut self) {
        if !self.config.auto_praise || self.praise.is_running() {
            return;
        }
        if self.canvas.is_none() {
            log::warn!("no canvas attached, praise popups disabled");
            return;
        }
        self.praise.start(self.config.praise_interval);
    }

    // -- Stars --

    /// Rebuild the registry from the authoritative award count.
    pub fn refresh_from_source(&mut self) {
        if self.anchor().is_none() {
            log::warn!("no star anchor, refresh skipped");
            return;
        }
        let count = self.source.award_count();
        // Every previous star is gone, so every fill on it is too
        self.fills.cancel_all();
        self.registry.refresh(count);
        log::debug!("registry rebuilt with {} stars (source {})", self.registry.len(), count);
    }

    /// Add an empty star and start filling it.
    pub fn start_filling_next_star(&mut self) {
        if !self.active {
            log::debug!("inactive, fill request ignored");
            return;
        }
        if self.anchor().is_none() {
            log::warn!("no star anchor, fill request skipped");
            return;
        }
        if let Some(star) = self.registry.add_filling_star() {
            self.fills.start(&self.registry, star, self.config.fill_duration);
        }
    }

    /// Celebrate the most recent star. No-op unless `awarded`.
    pub fn trigger_star(&mut self, awarded: bool) {
        if !awarded {
            return;
        }
        if !self.active {
            log::debug!("inactive, star trigger ignored");
            return;
        }
        let Some(canvas) = self.canvas else {
            log::warn!("no canvas attached, star celebration skipped");
            return;
        };
        let Some(anchor) = canvas.star_anchor else {
            log::warn!("no star anchor, star celebration skipped");
            return;
        };
        self.celebration.start(
            &mut self.ctx,
            &self.config,
            &mut self.registry,
            &mut self.fills,
            anchor,
            canvas.center(),
        );
    }

    /// Show the rating badge with sprite `index` and pulse it.
    pub fn show_rating(&mut self, index: i32) {
        if !self.active {
            return;
        }
        self.rating.show(&mut self.ctx, &self.config, index);
    }

    // -- Frame --

    /// Advance every sequence by the unscaled frame delta.
    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.ctx.clear_frame_data();

        let anchor = self.anchor().unwrap_or(Vec2::ZERO);
        for star in self.fills.tick(dt, &mut self.registry) {
            let pos = self.registry.get(star).map_or(anchor, |s| anchor + s.pos);
            self.ctx.emit_event(FeedbackEvent::new(FeedbackEvent::FILL_COMPLETE, star.0 as f32, pos.x, pos.y));
        }

        self.celebration.tick(dt, &mut self.ctx, &self.config, &mut self.registry);

        if let Some(canvas) = &self.canvas {
            self.praise.tick(dt, &mut self.ctx, &self.config, canvas);
        }

        // Pop-ins, vanishes and the rating pulse
        self.ctx.tweens.tick(dt, &mut self.ctx.arena);
    }

    pub fn build_display_buffer(&self, buffer: &mut DisplayBuffer) {
        render::build_display_buffer(&self.registry, self.anchor(), &self.config, &self.ctx.arena, buffer);
    }

    // -- Accessors --

    fn anchor(&self) -> Option<Vec2> {
        self.canvas.and_then(|c| c.star_anchor)
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn registry(&self) -> &StarRegistry {
        &self.registry
    }

    /// Ephemeral display objects. Once a rating has been shown the badge
    /// stays here until `deactivate`, so it is the only object left between
    /// sequences.
    pub fn arena(&self) -> &DisplayArena {
        &self.ctx.arena
    }

    pub fn praise(&self) -> &PraiseScheduler {
        &self.praise
    }

    /// Audio cues queued during the last tick.
    pub fn sounds(&self) -> &[AudioCue] {
        &self.ctx.sounds
    }

    /// Events emitted during the last tick.
    pub fn events(&self) -> &[FeedbackEvent] {
        &self.ctx.events
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_running()
    }

    /// The star whose fill is currently tracked.
    pub fn active_fill(&self) -> Option<StarId> {
        self.fills.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::SharedAwardCount;
    use crate::components::display::DisplayKind;

    fn canvas() -> Canvas {
        Canvas::new(Vec2::new(1920.0, 1080.0)).with_star_anchor(Vec2::new(800.0, 400.0))
    }

    fn coordinator(config: FeedbackConfig, count: i64) -> (FeedbackCoordinator, SharedAwardCount) {
        let source = SharedAwardCount::new(count);
        let mut coord = FeedbackCoordinator::new(config, Box::new(source.clone()));
        coord.attach_canvas(canvas());
        (coord, source)
    }

    fn quiet() -> FeedbackConfig {
        FeedbackConfig {
            auto_praise: false,
            ..Default::default()
        }
    }

    fn has_event(coord: &FeedbackCoordinator, kind: f32) -> bool {
        coord.events().iter().any(|e| e.kind == kind)
    }

    #[test]
    fn refresh_clamps_to_capacity() {
        let (mut coord, source) = coordinator(quiet(), 0);
        coord.activate();
        for count in -2..=17 {
            source.set(count);
            coord.refresh_from_source();
            assert_eq!(coord.registry().len(), count.clamp(0, 12) as usize);
            assert!(coord.registry().iter().all(|s| s.fill == 1.0));
        }
    }

    #[test]
    fn filling_stops_at_capacity() {
        let (mut coord, _) = coordinator(FeedbackConfig { max_stars: 3, ..quiet() }, 0);
        coord.activate();
        for _ in 0..4 {
            coord.start_filling_next_star();
        }
        assert_eq!(coord.registry().len(), 3);
    }

    #[test]
    fn fill_reaches_half_then_full() {
        let (mut coord, _) = coordinator(quiet(), 0);
        coord.activate();
        coord.start_filling_next_star();
        let star = coord.active_fill().unwrap();

        for _ in 0..5 {
            coord.tick(0.5);
        }
        assert!((coord.registry().get(star).unwrap().fill - 0.5).abs() < 1e-4);

        for _ in 0..5 {
            coord.tick(0.5);
        }
        assert_eq!(coord.registry().get(star).unwrap().fill, 1.0);
        assert!(has_event(&coord, FeedbackEvent::FILL_COMPLETE));
        assert!(coord.active_fill().is_none());
    }

    #[test]
    fn newer_fill_becomes_active() {
        let (mut coord, _) = coordinator(quiet(), 0);
        coord.activate();
        coord.start_filling_next_star();
        let first = coord.active_fill().unwrap();
        coord.tick(1.0);
        coord.start_filling_next_star();
        let second = coord.active_fill().unwrap();
        assert_ne!(first, second);

        // The untracked fill still completes
        for _ in 0..10 {
            coord.tick(0.5);
        }
        assert_eq!(coord.registry().get(first).unwrap().fill, 1.0);
        assert_eq!(coord.registry().get(second).unwrap().fill, 1.0);
    }

    #[test]
    fn celebration_mid_fill_ends_filled_and_clean() {
        let (mut coord, _) = coordinator(quiet(), 2);
        coord.activate();
        coord.start_filling_next_star();
        coord.tick(1.0);
        coord.trigger_star(true);
        assert!(coord.is_celebrating());
        assert!(has_event(&coord, FeedbackEvent::CELEBRATION_STARTED));

        let target = coord.registry().last_star().unwrap().id;
        let mut finished = false;
        for _ in 0..300 {
            coord.tick(1.0 / 60.0);
            finished |= has_event(&coord, FeedbackEvent::CELEBRATION_FINISHED);
        }
        assert!(finished);
        assert!(!coord.is_celebrating());
        assert_eq!(coord.registry().get(target).unwrap().fill, 1.0);
        assert!(coord.arena().is_empty());
    }

    #[test]
    fn trigger_needs_award_and_canvas() {
        let (mut coord, _) = coordinator(quiet(), 1);
        coord.activate();
        coord.trigger_star(false);
        assert!(!coord.is_celebrating());

        coord.detach_canvas();
        coord.trigger_star(true);
        assert!(!coord.is_celebrating());
        assert!(coord.arena().is_empty());
    }

    #[test]
    fn missing_anchor_mutates_nothing() {
        let source = SharedAwardCount::new(4);
        let mut coord = FeedbackCoordinator::new(quiet(), Box::new(source));
        coord.attach_canvas(Canvas::new(Vec2::new(800.0, 600.0)));
        coord.activate();
        coord.start_filling_next_star();
        coord.trigger_star(true);
        assert!(coord.registry().is_empty());
        assert!(coord.active_fill().is_none());
        assert!(!coord.is_celebrating());
    }

    #[test]
    fn praise_fires_on_interval_until_deactivated() {
        let config = FeedbackConfig {
            praise_interval: 5.0,
            praise_duration: 0.5,
            ..Default::default()
        };
        let (mut coord, _) = coordinator(config, 0);
        coord.activate();

        let mut fired_at = Vec::new();
        for step in 1..=64 {
            coord.tick(0.25);
            if has_event(&coord, FeedbackEvent::PRAISE_SPAWNED) {
                fired_at.push(step as f32 * 0.25);
            }
        }
        assert_eq!(fired_at, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn deactivate_stops_praise() {
        let config = FeedbackConfig {
            praise_interval: 5.0,
            ..Default::default()
        };
        let (mut coord, _) = coordinator(config, 0);
        coord.activate();

        let mut fired = 0;
        for step in 1..=80 {
            if step == 29 {
                coord.deactivate();
            }
            coord.tick(0.25);
            if has_event(&coord, FeedbackEvent::PRAISE_SPAWNED) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(!coord.praise().is_running());
        assert!(coord.arena().is_empty());
    }

    #[test]
    fn deactivate_mid_celebration_freezes_state() {
        let (mut coord, _) = coordinator(quiet(), 0);
        coord.activate();
        coord.start_filling_next_star();
        coord.tick(0.5);
        coord.trigger_star(true);
        coord.tick(0.35);
        assert!(!coord.arena().is_empty());

        coord.deactivate();
        assert!(!coord.is_celebrating());
        assert!(coord.arena().is_empty());
        assert!(coord.active_fill().is_none());
        let star = coord.registry().last_star().unwrap().clone();
        assert_eq!(star.fill, 1.0);

        for _ in 0..120 {
            coord.tick(0.1);
        }
        assert!(coord.events().is_empty());
        assert!(coord.sounds().is_empty());
        assert!(coord.arena().is_empty());
        assert_eq!(coord.registry().last_star().unwrap().fill, star.fill);
    }

    #[test]
    fn rating_shows_and_pulses() {
        let config = FeedbackConfig {
            rating_sprites: 2,
            ..quiet()
        };
        let (mut coord, _) = coordinator(config, 0);
        coord.activate();
        coord.show_rating(5);
        assert!(coord.arena().is_empty());

        coord.show_rating(1);
        coord.tick(0.1);
        let badge = coord.arena().iter().find(|o| o.kind == DisplayKind::Badge).unwrap();
        assert!(badge.active);
        assert_eq!(badge.sprite, 1);
        assert!((badge.scale - 1.1).abs() < 1e-4);
    }

    #[test]
    fn display_buffer_holds_stars_and_popups() {
        let (mut coord, _) = coordinator(quiet(), 2);
        coord.activate();
        coord.trigger_star(true);
        coord.tick(0.3);

        let mut buf = DisplayBuffer::new();
        coord.build_display_buffer(&mut buf);
        // 2 stars + particle + moving star + label
        assert_eq!(buf.instance_count(), 5);
        assert_eq!(buf.labels.len(), 1);
        assert_eq!(buf.labels[0].text, "You Got A Star!");
    }

    #[test]
    fn long_frame_spawns_one_praise() {
        let config = FeedbackConfig {
            praise_interval: 5.0,
            ..Default::default()
        };
        let (mut coord, _) = coordinator(config, 0);
        coord.activate();
        coord.tick(120.0);

        let spawned = coord
            .events()
            .iter()
            .filter(|e| e.kind == FeedbackEvent::PRAISE_SPAWNED)
            .count();
        assert_eq!(spawned, 1);
        assert_eq!(coord.praise().events().len(), 1);
        assert!(coord.sounds().len() <= 1);
    }

    #[test]
    fn huge_capacity_does_not_allocate_up_front() {
        let config = FeedbackConfig::from_json(r#"{"max_stars": 18446744073709551615}"#).unwrap();
        let (mut coord, _) = coordinator(config, 3);
        coord.activate();
        assert_eq!(coord.registry().max_stars(), usize::MAX);
        assert_eq!(coord.registry().len(), 3);
    }

    #[test]
    fn badge_is_the_only_survivor_of_a_celebration() {
        let config = FeedbackConfig {
            rating_sprites: 2,
            ..quiet()
        };
        let (mut coord, _) = coordinator(config, 1);
        coord.activate();
        coord.show_rating(0);
        coord.trigger_star(true);
        for _ in 0..120 {
            coord.tick(1.0 / 60.0);
        }
        assert!(!coord.is_celebrating());
        let kinds: Vec<_> = coord.arena().iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![DisplayKind::Badge]);

        coord.deactivate();
        assert!(coord.arena().is_empty());
    }

    #[test]
    fn inactive_ticks_are_ignored() {
        let (mut coord, _) = coordinator(quiet(), 0);
        coord.tick(100.0);
        assert!(coord.events().is_empty());
        assert!(!coord.is_active());
    }
}
