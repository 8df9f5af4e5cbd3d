use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::types::DisplayId;

/// What a display object looks like on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayKind {
    /// Star sprite (radial fill).
    #[default]
    Star,
    /// Text label.
    Text,
    /// Particle burst prefab.
    Particle,
    /// Rating badge sprite.
    Badge,
}

impl DisplayKind {
    /// Numeric code written to the display buffer.
    pub fn code(self) -> f32 {
        match self {
            DisplayKind::Star => 0.0,
            DisplayKind::Text => 1.0,
            DisplayKind::Particle => 2.0,
            DisplayKind::Badge => 3.0,
        }
    }
}

/// Text attached to a display object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub font_size: u32,
    /// RGBA, 0..1.
    pub color: [f32; 4],
}

/// Fat display object: a single struct with optional label.
/// Positions are canvas-local (origin at the canvas centre, +Y up).
#[derive(Debug, Clone)]
pub struct DisplayObject {
    /// Unique identifier.
    pub id: DisplayId,
    pub kind: DisplayKind,
    /// Whether this object is drawn (inactive objects are skipped).
    pub active: bool,
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Unscaled size in canvas units.
    pub size: Vec2,
    /// Uniform scale applied on top of `size`.
    pub scale: f32,
    /// Fill level for star sprites, 0..1.
    pub fill: f32,
    pub alpha: f32,
    /// Sprite index for badges (host-defined).
    pub sprite: u32,
    pub label: Option<Label>,
}

impl DisplayObject {
    /// Create a new object of the given kind at the canvas centre.
    pub fn new(id: DisplayId, kind: DisplayKind) -> Self {
        Self {
            id,
            kind,
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            size: Vec2::ONE,
            scale: 1.0,
            fill: 1.0,
            alpha: 1.0,
            sprite: 0,
            label: None,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.active = false;
        self
    }

    /// Rendered size (size × scale).
    pub fn extent(&self) -> Vec2 {
        self.size * self.scale
    }
}
