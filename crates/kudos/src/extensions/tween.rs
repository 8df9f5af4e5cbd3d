// extensions/tween.rs
//
// Tween system: manages animated value transitions by DisplayId.
// Decoupled from the sequences that spawn the objects.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(label_id, Tween::pop(0.02, 1.6, 1.0, 0.2));
//   tweens.tick(dt, &mut arena);  // Advances all tweens, updates objects

use std::collections::HashMap;
use crate::api::types::DisplayId;
use crate::core::arena::DisplayArena;
use super::easing::{Easing, ease, progress};

/// What property a tween animates.
#[derive(Debug, Clone, Copy)]
pub enum TweenTarget {
    /// Animate DisplayObject.scale
    Scale { from: f32, to: f32 },
    /// Two-stage scale: grow to `peak` over the first half, settle over the second.
    Pop { start: f32, peak: f32, settle: f32 },
}

/// What happens to the object when a tween completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenEnd {
    /// Leave the object in place.
    #[default]
    Keep,
    /// Remove the object from the arena.
    Despawn,
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    /// What to animate.
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    /// Easing function.
    pub easing: Easing,
    pub on_end: TweenEnd,
}

impl Tween {
    fn with_target(target: TweenTarget, duration: f32) -> Self {
        Self {
            target,
            duration,
            elapsed: 0.0,
            easing: Easing::SmoothStep,
            on_end: TweenEnd::Keep,
        }
    }

    /// Create a uniform scale tween.
    pub fn scale(from: f32, to: f32, duration: f32) -> Self {
        Self::with_target(TweenTarget::Scale { from, to }, duration)
    }

    /// Pop-in: `start → peak → settle`, each half taking `duration / 2`.
    pub fn pop(start: f32, peak: f32, settle: f32, duration: f32) -> Self {
        Self::with_target(TweenTarget::Pop { start, peak, settle }, duration)
    }

    // -- Builder methods --

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Despawn the object once the tween finishes.
    pub fn then_despawn(mut self) -> Self {
        self.on_end = TweenEnd::Despawn;
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<u32, (DisplayId, Tween)>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween for an object. Several tweens may target one object.
    pub fn add(&mut self, object: DisplayId, tween: Tween) {
        let id = self.next_id;
        self.next_id += 1;
        self.tweens.insert(id, (object, tween));
    }

    /// Remove all tweens for an object.
    pub fn remove_object(&mut self, object: DisplayId) {
        self.tweens.retain(|_, (o, _)| *o != object);
    }

    /// Replace whatever is animating `object` with `tween`.
    pub fn replace(&mut self, object: DisplayId, tween: Tween) {
        self.remove_object(object);
        self.add(object, tween);
    }

    /// Whether any tween targets `object`.
    pub fn is_animating(&self, object: DisplayId) -> bool {
        self.tweens.values().any(|(o, _)| *o == object)
    }

    /// Advance all tweens and apply to objects in the arena.
    /// Tweens whose object has been despawned are dropped.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, arena: &mut DisplayArena) -> usize {
        let mut completed = Vec::new();

        for (&id, (object_id, tween)) in self.tweens.iter_mut() {
            let Some(object) = arena.get_mut(*object_id) else {
                completed.push((id, *object_id, TweenEnd::Keep));
                continue;
            };

            tween.elapsed += dt;
            let t = tween.progress();

            match tween.target {
                TweenTarget::Scale { from, to } => {
                    object.scale = ease(from, to, t, tween.easing);
                }
                TweenTarget::Pop { start, peak, settle } => {
                    object.scale = if t < 0.5 {
                        ease(start, peak, t * 2.0, tween.easing)
                    } else {
                        ease(peak, settle, (t - 0.5) * 2.0, tween.easing)
                    };
                }
            }

            if tween.is_complete() {
                completed.push((id, *object_id, tween.on_end));
            }
        }

        let count = completed.len();
        for (id, object_id, on_end) in completed {
            self.tweens.remove(&id);
            if on_end == TweenEnd::Despawn {
                arena.despawn(object_id);
                self.remove_object(object_id);
            }
        }

        count
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Clear all tweens.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::display::DisplayKind;

    #[test]
    fn tween_scale_linear() {
        let mut tweens = TweenState::new();
        let mut arena = DisplayArena::new();
        let id = arena.spawn_with(DisplayKind::Star, |o| o);

        tweens.add(id, Tween::scale(0.0, 100.0, 1.0).with_easing(Easing::Linear));

        // Tick halfway
        tweens.tick(0.5, &mut arena);
        assert!((arena.get(id).unwrap().scale - 50.0).abs() < 0.01);

        // Tick to completion
        tweens.tick(0.5, &mut arena);
        assert!((arena.get(id).unwrap().scale - 100.0).abs() < 0.01);

        // Tween should be removed
        assert!(tweens.is_empty());
    }

    #[test]
    fn pop_peaks_then_settles() {
        let mut tweens = TweenState::new();
        let mut arena = DisplayArena::new();
        let id = arena.spawn_with(DisplayKind::Text, |o| o.with_scale(0.02));

        tweens.add(id, Tween::pop(0.02, 1.6, 1.0, 0.2));

        tweens.tick(0.1, &mut arena);
        assert!((arena.get(id).unwrap().scale - 1.6).abs() < 1e-4);

        tweens.tick(0.1, &mut arena);
        assert!((arena.get(id).unwrap().scale - 1.0).abs() < 1e-4);
        assert!(tweens.is_empty());
    }

    #[test]
    fn despawn_on_end() {
        let mut tweens = TweenState::new();
        let mut arena = DisplayArena::new();
        let id = arena.spawn_with(DisplayKind::Particle, |o| o);

        tweens.add(id, Tween::scale(1.0, 0.05, 0.15).then_despawn());
        tweens.tick(0.1, &mut arena);
        assert!(arena.contains(id));
        tweens.tick(0.1, &mut arena);
        assert!(!arena.contains(id));
        assert!(tweens.is_empty());
    }

    #[test]
    fn despawn_drops_sibling_tweens() {
        let mut tweens = TweenState::new();
        let mut arena = DisplayArena::new();
        let id = arena.spawn_with(DisplayKind::Text, |o| o);

        tweens.add(id, Tween::scale(1.0, 0.0, 0.1).then_despawn());
        tweens.add(id, Tween::pop(0.0, 2.0, 1.0, 10.0));
        tweens.tick(0.2, &mut arena);
        assert!(tweens.is_empty());
    }

    #[test]
    fn orphaned_tween_is_dropped() {
        let mut tweens = TweenState::new();
        let mut arena = DisplayArena::new();
        let id = arena.spawn_with(DisplayKind::Star, |o| o);
        tweens.add(id, Tween::scale(0.0, 1.0, 5.0));

        arena.despawn(id);
        tweens.tick(0.1, &mut arena);
        assert!(tweens.is_empty());
    }

    #[test]
    fn replace_and_remove_object() {
        let mut tweens = TweenState::new();
        let id = DisplayId(1);

        tweens.add(id, Tween::scale(0.0, 1.0, 1.0));
        tweens.add(id, Tween::pop(0.0, 1.5, 1.0, 1.0));
        assert_eq!(tweens.len(), 2);

        tweens.replace(id, Tween::scale(1.0, 0.0, 1.0));
        assert_eq!(tweens.len(), 1);
        assert!(tweens.is_animating(id));

        tweens.remove_object(id);
        assert!(tweens.is_empty());
    }
}
