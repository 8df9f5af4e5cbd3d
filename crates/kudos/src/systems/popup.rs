use glam::Vec2;
use crate::api::config::FeedbackConfig;
use crate::api::context::FeedbackContext;
use crate::api::types::DisplayId;
use crate::components::display::{DisplayKind, DisplayObject, Label};
use crate::extensions::tween::Tween;

/// Box size of a praise label.
pub const PRAISE_LABEL_SIZE: Vec2 = Vec2::new(600.0, 200.0);
/// Box size of the celebration label.
pub const CELEBRATION_LABEL_SIZE: Vec2 = Vec2::new(600.0, 120.0);
/// Smallest font size a praise label is drawn with.
pub const PRAISE_MIN_FONT_SIZE: u32 = 8;
/// Smallest font size the celebration label is drawn with.
pub const CELEBRATION_MIN_FONT_SIZE: u32 = 12;
/// Size of a particle burst before scaling.
pub const PARTICLE_SIZE: Vec2 = Vec2::new(256.0, 256.0);

/// Start a pop-in on `id`: tiny → `final_scale × flash_scale` → `final_scale`.
pub fn pop_in(ctx: &mut FeedbackContext, config: &FeedbackConfig, id: DisplayId, final_scale: f32) {
    let start = final_scale * config.pop_initial_scale;
    if let Some(obj) = ctx.arena.get_mut(id) {
        obj.scale = start;
    }
    ctx.tweens.replace(
        id,
        Tween::pop(start, final_scale * config.flash_scale, final_scale, config.flash_duration),
    );
}

/// Shrink `id` to the destroy scale, then remove it. Overrides any running pop.
pub fn vanish(ctx: &mut FeedbackContext, config: &FeedbackConfig, id: DisplayId) {
    let Some(obj) = ctx.arena.get(id) else {
        return;
    };
    let from = obj.scale;
    ctx.tweens.replace(
        id,
        Tween::scale(from, config.destroy_target_scale, config.destroy_scale_duration).then_despawn(),
    );
}

/// Spawn a text label at `pos` and pop it in. The configured font size is
/// raised to `min_font_size` if smaller.
pub fn spawn_label(
    ctx: &mut FeedbackContext,
    config: &FeedbackConfig,
    text: &str,
    pos: Vec2,
    rotation: f32,
    size: Vec2,
    min_font_size: u32,
) -> DisplayId {
    let label = Label {
        text: text.to_string(),
        font_size: config.font_size.max(min_font_size),
        color: config.text_color,
    };
    let id = ctx.arena.spawn_with(DisplayKind::Text, |o| {
        o.with_pos(pos).with_rotation(rotation).with_size(size).with_label(label)
    });
    pop_in(ctx, config, id, 1.0);
    id
}

/// Spawn a particle burst at `pos` (drawn behind `behind`, if given) and pop it in.
/// `None` when particles are off.
pub fn spawn_particle(
    ctx: &mut FeedbackContext,
    config: &FeedbackConfig,
    pos: Vec2,
    behind: Option<DisplayId>,
) -> Option<DisplayId> {
    if !config.particles {
        return None;
    }
    let build = |o: DisplayObject| o.with_pos(pos).with_size(PARTICLE_SIZE);
    let id = match behind {
        Some(target) => ctx.arena.spawn_behind(DisplayKind::Particle, target, build),
        None => ctx.arena.spawn_with(DisplayKind::Particle, build),
    };
    pop_in(ctx, config, id, config.particle_scale);
    Some(id)
}
