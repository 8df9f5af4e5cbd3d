use crate::api::types::{AudioCue, DisplayId, FeedbackEvent};
use crate::core::arena::DisplayArena;
use crate::extensions::tween::TweenState;
use crate::systems::rng::Rng;

/// Mutable state shared by every feedback sequence: the ephemeral display
/// objects, the tweens animating them, and this frame's audio and events.
pub struct FeedbackContext {
    pub arena: DisplayArena,
    pub tweens: TweenState,
    pub sounds: Vec<AudioCue>,
    pub events: Vec<FeedbackEvent>,
    pub rng: Rng,
}

impl FeedbackContext {
    pub fn new(seed: u64) -> Self {
        Self {
            arena: DisplayArena::new(),
            tweens: TweenState::new(),
            sounds: Vec::new(),
            events: Vec::new(),
            rng: Rng::new(seed),
        }
    }

    /// Queue an audio cue for the host.
    pub fn emit_sound(&mut self, cue: AudioCue) {
        self.sounds.push(cue);
    }

    /// Queue a feedback event for the host.
    pub fn emit_event(&mut self, event: FeedbackEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Remove an object and anything animating it.
    pub fn release(&mut self, id: DisplayId) {
        self.tweens.remove_object(id);
        self.arena.despawn(id);
    }
}

impl Default for FeedbackContext {
    fn default() -> Self {
        Self::new(42)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::display::DisplayKind;
    use crate::extensions::tween::Tween;

    #[test]
    fn clear_frame_data_keeps_objects() {
        let mut ctx = FeedbackContext::default();
        let id = ctx.arena.spawn_with(DisplayKind::Text, |o| o);
        ctx.emit_sound(AudioCue(3));
        ctx.emit_event(FeedbackEvent::new(FeedbackEvent::PRAISE_SPAWNED, 0.0, 0.0, 0.0));

        ctx.clear_frame_data();
        assert!(ctx.sounds.is_empty());
        assert!(ctx.events.is_empty());
        assert!(ctx.arena.contains(id));
    }

    #[test]
    fn release_drops_object_and_tweens() {
        let mut ctx = FeedbackContext::default();
        let id = ctx.arena.spawn_with(DisplayKind::Particle, |o| o);
        ctx.tweens.add(id, Tween::scale(0.0, 1.0, 1.0));

        ctx.release(id);
        assert!(ctx.arena.is_empty());
        assert!(ctx.tweens.is_empty());
    }
}
