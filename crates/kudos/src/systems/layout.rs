use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rule mapping a star's index to its position inside the star container.
/// Positions are relative to the container anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// Stars evenly spaced on a ring. A lone star sits inset at `(-radius, -radius)`.
    Circular { radius: f32 },
    /// Vertical column growing upward; star 0 sits at the anchor origin.
    Stack { spacing: f32 },
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        LayoutPolicy::Circular { radius: 40.0 }
    }
}

impl LayoutPolicy {
    /// Position of star `index` when `count` stars are shown.
    pub fn position(&self, index: usize, count: usize) -> Vec2 {
        match *self {
            LayoutPolicy::Circular { radius } => {
                if count <= 1 {
                    return Vec2::splat(-radius);
                }
                let angle = (index as f32 * (360.0 / count as f32)).to_radians();
                Vec2::new(angle.cos(), angle.sin()) * radius
            }
            LayoutPolicy::Stack { spacing } => Vec2::new(0.0, index as f32 * spacing),
        }
    }

    /// Fallback position used when there is no star to read a position from.
    pub fn corner(&self) -> Vec2 {
        self.position(0, 1)
    }
}
