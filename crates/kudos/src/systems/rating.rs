use crate::api::config::FeedbackConfig;
use crate::api::context::FeedbackContext;
use crate::api::types::DisplayId;
use crate::components::display::DisplayKind;
use crate::extensions::easing::Easing;
use crate::extensions::tween::Tween;

/// Recent-performance badge shown when a song ends. Hidden until the first
/// valid `show`, then pulses on every retrigger.
#[derive(Debug, Default)]
pub struct RatingBadge {
    badge: Option<DisplayId>,
}

impl RatingBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn badge(&self) -> Option<DisplayId> {
        self.badge
    }

    /// Show sprite `index` and restart the pulse. Indices outside
    /// `[0, rating_sprites)` leave the badge untouched.
    pub fn show(&mut self, ctx: &mut FeedbackContext, config: &FeedbackConfig, index: i32) -> bool {
        let sprite = match usize::try_from(index) {
            Ok(i) if i < config.rating_sprites => i as u32,
            _ => {
                log::debug!("rating index {} outside 0..{}, ignored", index, config.rating_sprites);
                return false;
            }
        };

        let id = self.ensure_badge(ctx, config);
        if let Some(badge) = ctx.arena.get_mut(id) {
            badge.active = true;
            badge.sprite = sprite;
            badge.scale = 1.0;
        }
        // A retrigger restarts the pulse rather than stacking a second one
        ctx.tweens.replace(
            id,
            Tween::pop(1.0, config.pulse_scale, 1.0, config.pulse_duration).with_easing(Easing::Linear),
        );
        true
    }

    /// Whether the badge is mid-pulse.
    pub fn is_pulsing(&self, ctx: &FeedbackContext) -> bool {
        self.badge.is_some_and(|id| ctx.tweens.is_animating(id))
    }

    /// Remove the badge and its pulse.
    pub fn stop(&mut self, ctx: &mut FeedbackContext) {
        if let Some(id) = self.badge.take() {
            ctx.release(id);
        }
    }

    fn ensure_badge(&mut self, ctx: &mut FeedbackContext, config: &FeedbackConfig) -> DisplayId {
        if let Some(id) = self.badge.filter(|id| ctx.arena.contains(*id)) {
            return id;
        }
        let id = ctx.arena.spawn_with(DisplayKind::Badge, |o| {
            o.with_pos(config.rating_position).with_size(config.rating_size).hidden()
        });
        self.badge = Some(id);
        id
    }
}
