use glam::Vec2;

/// The display surface the host draws feedback onto.
/// Canvas-local coordinates: origin at the centre, +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    /// Width and height in canvas units.
    pub size: Vec2,
    /// Position of the star container. Stars are laid out relative to it.
    pub star_anchor: Option<Vec2>,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            star_anchor: None,
        }
    }

    pub fn with_star_anchor(mut self, anchor: Vec2) -> Self {
        self.star_anchor = Some(anchor);
        self
    }

    /// Canvas centre (the celebration target).
    pub fn center(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Map a normalized point (`(0,0)` bottom-left, `(1,1)` top-right) to canvas-local.
    pub fn from_normalized(&self, p: Vec2) -> Vec2 {
        (p - Vec2::splat(0.5)) * self.size
    }
}
