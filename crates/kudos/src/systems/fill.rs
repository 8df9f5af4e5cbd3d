//! Slow radial fill of the star currently being earned.
//!
//! Each fill operation holds a `StarId`, not a reference, and re-resolves it
//! every tick: a star removed by a registry rebuild simply ends its operation.

use std::cell::Cell;
use std::rc::Rc;
use crate::api::types::StarId;
use crate::extensions::easing::{Easing, ease, progress};
use super::registry::StarRegistry;

/// Shared cancellation flag for one fill operation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Where a star is in its fill lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStage {
    Empty,
    Filling,
    Filled,
}

#[derive(Debug, Clone)]
struct FillOp {
    star: StarId,
    from: f32,
    elapsed: f32,
    duration: f32,
    token: CancelToken,
}

/// Drives fill operations. Several may run at once (an older one keeps going
/// after a newer one starts), but only the newest is tracked as active.
#[derive(Debug, Default)]
pub struct FillAnimator {
    ops: Vec<FillOp>,
    active: Option<StarId>,
}

impl FillAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start filling `star` from its current level to 1.0 over `duration`.
    /// Returns `None` if the star is not in the registry.
    pub fn start(&mut self, registry: &StarRegistry, star: StarId, duration: f32) -> Option<CancelToken> {
        let from = registry.get(star)?.fill;
        // A restarted star has exactly one writer
        self.cancel_star(star);

        if let Some(previous) = self.active.replace(star) {
            log::debug!("fill of star {:?} untracked, star {:?} is now active", previous, star);
        }

        let token = CancelToken::new();
        self.ops.push(FillOp {
            star,
            from,
            elapsed: 0.0,
            duration,
            token: token.clone(),
        });
        Some(token)
    }

    /// Cancel every operation writing to `star`.
    pub fn cancel_star(&mut self, star: StarId) {
        for op in self.ops.iter().filter(|op| op.star == star) {
            op.token.cancel();
        }
        self.ops.retain(|op| op.star != star);
        if self.active == Some(star) {
            self.active = None;
        }
    }

    /// Cancel every operation.
    pub fn cancel_all(&mut self) {
        for op in &self.ops {
            op.token.cancel();
        }
        self.ops.clear();
        self.active = None;
    }

    /// Advance all operations. Returns the stars that finished filling this tick.
    pub fn tick(&mut self, dt: f32, registry: &mut StarRegistry) -> Vec<StarId> {
        let mut finished = Vec::new();

        self.ops.retain_mut(|op| {
            if op.token.is_cancelled() {
                return false;
            }
            let Some(star) = registry.get_mut(op.star) else {
                op.token.cancel();
                return false;
            };

            op.elapsed += dt;
            let t = progress(op.elapsed, op.duration);
            if t >= 1.0 {
                star.fill = 1.0;
                finished.push(op.star);
                return false;
            }
            star.fill = ease(op.from, 1.0, t, Easing::SmoothStep);
            true
        });

        if let Some(active) = self.active {
            if !self.ops.iter().any(|op| op.star == active) {
                self.active = None;
            }
        }

        finished
    }

    /// The star whose fill is currently tracked.
    pub fn active(&self) -> Option<StarId> {
        self.active
    }

    pub fn is_filling(&self, star: StarId) -> bool {
        self.ops.iter().any(|op| op.star == star)
    }

    pub fn stage(&self, registry: &StarRegistry, star: StarId) -> Option<FillStage> {
        let fill = registry.get(star)?.fill;
        Some(if self.is_filling(star) {
            FillStage::Filling
        } else if fill >= 1.0 {
            FillStage::Filled
        } else {
            FillStage::Empty
        })
    }

    /// Number of running operations (tracked or not).
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
