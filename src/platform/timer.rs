//! Variable-interval tick timer
//!
//! The front end owns the clock; the simulation only asks for ticks. The
//! interval is re-read on every tick, so a speed change from eating food
//! applies to the very next tick.

/// Maximum ticks delivered per frame to prevent spiral of death.
/// A frame counts for at most this many intervals; longer gaps (tab switch,
/// debugger) are clamped.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

#[derive(Debug, Clone, Default)]
pub struct TickTimer {
    accumulator_ms: f64,
    ticks_this_frame: u32,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame's elapsed time at the current tick interval
    pub fn accumulate(&mut self, elapsed_ms: f64, interval_ms: u32) {
        let longest = f64::from(MAX_TICKS_PER_FRAME) * f64::from(interval_ms.max(1));
        self.accumulator_ms += elapsed_ms.clamp(0.0, longest);
        self.ticks_this_frame = 0;
    }

    /// Consume one tick if `interval_ms` has elapsed.
    ///
    /// Once the per-frame cap is hit the backlog is dropped.
    pub fn take_tick(&mut self, interval_ms: u32) -> bool {
        let interval = f64::from(interval_ms.max(1));
        if self.accumulator_ms < interval {
            return false;
        }
        if self.ticks_this_frame >= MAX_TICKS_PER_FRAME {
            self.accumulator_ms %= interval;
            return false;
        }
        self.accumulator_ms -= interval;
        self.ticks_this_frame += 1;
        true
    }

    /// Time until the next tick is due (ms)
    pub fn until_next(&self, interval_ms: u32) -> f64 {
        (f64::from(interval_ms) - self.accumulator_ms).max(0.0)
    }

    /// Forget accumulated time (call while not playing)
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.ticks_this_frame = 0;
    }
}
