use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Per-instance display data read by the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
///
/// `width`/`height` are the rendered size in canvas units (scale applied).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DisplayInstance {
    /// X position, canvas-local.
    pub x: f32,
    /// Y position, canvas-local (+Y up).
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    /// Radial fill for stars, 0..1. Sprite index for badges.
    pub fill: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// `DisplayKind::code`.
    pub kind: f32,
}

impl DisplayInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Text to draw on top of the instance at index `instance`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRecord {
    pub instance: u32,
    pub text: String,
    pub font_size: u32,
    pub color: [f32; 4],
}

/// Everything the host draws this frame, in draw order.
pub struct DisplayBuffer {
    pub instances: Vec<DisplayInstance>,
    pub labels: Vec<LabelRecord>,
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(64),
            labels: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.labels.clear();
    }

    /// Append an instance, returning its index.
    pub fn push(&mut self, instance: DisplayInstance) -> u32 {
        self.instances.push(instance);
        self.instances.len() as u32 - 1
    }

    pub fn push_label(&mut self, label: LabelRecord) {
        self.labels.push(label);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Labels as a JSON array.
    pub fn labels_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.labels)
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
