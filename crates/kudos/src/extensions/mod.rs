// extensions/mod.rs
//
// Animation helpers shared by every feedback sequence.
// Decoupled from the sequences themselves: they only see DisplayIds and the arena.

pub mod easing;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec2, ease, ease_vec2, progress};
pub use tween::{TweenState, Tween, TweenTarget, TweenEnd};
