pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::FeedbackConfig;
pub use api::context::FeedbackContext;
pub use api::coordinator::FeedbackCoordinator;
pub use api::source::{AwardSource, SharedAwardCount};
pub use api::types::{AudioCue, DisplayId, FeedbackEvent, StarId};
pub use components::canvas::Canvas;
pub use components::display::{DisplayKind, DisplayObject, Label};
pub use core::arena::DisplayArena;
pub use core::time::IntervalTimer;
pub use renderer::instance::{DisplayBuffer, DisplayInstance, LabelRecord};
pub use systems::celebration::{Celebration, CelebrationPhase, CELEBRATE_HOLD};
pub use systems::fill::{CancelToken, FillAnimator, FillStage};
pub use systems::layout::LayoutPolicy;
pub use systems::praise::{PraiseEvent, PraiseScheduler, PraiseStage, SpawnRegion};
pub use systems::rating::RatingBadge;
pub use systems::registry::{Star, StarRegistry};
pub use systems::rng::Rng;

pub use extensions::{
    Easing, lerp, lerp_vec2, ease, ease_vec2,
    TweenState, Tween, TweenTarget,
};
