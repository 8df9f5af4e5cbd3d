use bytemuck::{Pod, Zeroable};

/// Handle to an ephemeral display object in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayId(pub u32);

/// Sequence index of a persistent star. Never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StarId(pub u32);

/// An audio cue emitted by the feedback logic.
/// The numeric value maps to a host-defined clip (voice line, chime).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct AudioCue(pub u32);

/// A feedback event communicated to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FeedbackEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl FeedbackEvent {
    pub const FLOATS: usize = 4;

    /// A star finished filling. `a` = star id.
    pub const FILL_COMPLETE: f32 = 1.0;
    /// A celebration started. `a` = star id (or -1 when no registry star exists).
    pub const CELEBRATION_STARTED: f32 = 2.0;
    /// A celebration finished and its objects are gone. `a` = star id (or -1).
    pub const CELEBRATION_FINISHED: f32 = 3.0;
    /// A praise popup spawned. `a` = phrase index, `b/c` = canvas position.
    pub const PRAISE_SPAWNED: f32 = 4.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
