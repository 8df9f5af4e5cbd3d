/// Shortest period an interval timer accepts, in seconds.
pub const MIN_INTERVAL: f32 = 0.01;

/// Repeating timer driven by unscaled frame deltas.
/// The first fire happens after one full interval, never on the first tick.
/// Fires at most once per frame: intervals missed during a stall are dropped.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    /// Period between fires.
    interval: f32,
    /// Time accumulated since the last fire.
    accumulator: f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        let interval = if interval.is_finite() { interval.max(MIN_INTERVAL) } else { MIN_INTERVAL };
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns whether the timer fired.
    /// The phase within the current interval is kept.
    pub fn accumulate(&mut self, frame_dt: f32) -> bool {
        if !(frame_dt > 0.0) {
            return false;
        }
        self.accumulator += frame_dt;
        if self.accumulator < self.interval {
            return false;
        }
        self.accumulator %= self.interval;
        true
    }
}
