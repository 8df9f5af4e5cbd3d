use glam::Vec2;
use crate::api::config::FeedbackConfig;
use crate::components::display::{DisplayKind, DisplayObject};
use crate::core::arena::DisplayArena;
use crate::renderer::instance::{DisplayBuffer, DisplayInstance, LabelRecord};
use super::registry::StarRegistry;

/// Build the display buffer: persistent stars first (at `anchor + pos`),
/// then every active ephemeral object in arena order.
/// Without an anchor the registry is not drawn.
pub fn build_display_buffer(
    registry: &StarRegistry,
    anchor: Option<Vec2>,
    config: &FeedbackConfig,
    arena: &DisplayArena,
    buffer: &mut DisplayBuffer,
) {
    buffer.clear();

    if let Some(anchor) = anchor {
        for star in registry.iter() {
            let pos = anchor + star.pos;
            buffer.push(DisplayInstance {
                x: pos.x,
                y: pos.y,
                rotation: 0.0,
                width: config.small_star_size.x,
                height: config.small_star_size.y,
                fill: star.fill,
                alpha: 1.0,
                kind: DisplayKind::Star.code(),
            });
        }
    }

    for obj in arena.iter().filter(|o| o.active) {
        let index = buffer.push(instance_for(obj));
        if let Some(label) = &obj.label {
            buffer.push_label(LabelRecord {
                instance: index,
                text: label.text.clone(),
                font_size: label.font_size,
                color: label.color,
            });
        }
    }
}

fn instance_for(obj: &DisplayObject) -> DisplayInstance {
    let extent = obj.extent();
    let fill = match obj.kind {
        DisplayKind::Badge => obj.sprite as f32,
        _ => obj.fill,
    };
    DisplayInstance {
        x: obj.pos.x,
        y: obj.pos.y,
        rotation: obj.rotation,
        width: extent.x,
        height: extent.y,
        fill,
        alpha: obj.alpha,
        kind: obj.kind.code(),
    }
}
