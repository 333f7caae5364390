//! Frame timing: the cyclic time uniform, FPS reporting, and frame pacing.
//!
//! Three independent clocks drive the preview:
//!
//! - The **cyclic time** uniform wraps elapsed time into a repeating [0, 1)
//!   signal so long-running shaders never lose float precision to an
//!   ever-growing value.
//! - The **FPS counter** closes a one-second window, reports, and advances
//!   its anchor by exactly one second (never "anchor = now"), so reporting
//!   cannot drift relative to wall-clock seconds.
//! - The **frame budget** caps the loop rate: the target sits slightly above
//!   the vertical-sync rate so the explicit end-of-frame sleep, not vsync,
//!   is the dominant pacing mechanism.

use std::time::{Duration, Instant};

/// Period of the repeating `TIME` uniform.
pub const TIME_PERIOD: Duration = Duration::from_secs(4);

/// Target frame rate in Hz. Slightly above 60 so the end-of-frame sleep
/// undershoots vsync and stays the dominant pacing mechanism.
pub const TARGET_RATE_HZ: u64 = 62;

/// Maximum duration of one loop iteration at the target rate.
pub const FRAME_BUDGET: Duration = Duration::from_nanos(1_000_000_000 / TARGET_RATE_HZ);

/// Width of the FPS reporting window.
const REPORT_WINDOW: Duration = Duration::from_secs(1);

/// Wraps elapsed time into the repeating unit interval.
///
/// Returns `elapsed mod period` normalized to [0, 1). The value at every
/// exact multiple of `period` equals the value at zero. A zero period
/// yields 0.0.
pub fn cyclic_time(elapsed: Duration, period: Duration) -> f32 {
    let period_ns = period.as_nanos();
    if period_ns == 0 {
        return 0.0;
    }
    ((elapsed.as_nanos() % period_ns) as f64 / period_ns as f64) as f32
}

/// Returns the time still left in the frame budget, or `None` once the
/// budget is spent. The caller sleeps for the returned remainder.
pub fn remaining_budget(elapsed: Duration, budget: Duration) -> Option<Duration> {
    if elapsed < budget {
        Some(budget - elapsed)
    } else {
        None
    }
}

/// One closed FPS reporting window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsSample {
    /// Mean milliseconds per frame over the window.
    pub ms_per_frame: f64,
    /// Frames counted in the window.
    pub frames: u32,
}

/// Counts frames against a fixed one-second anchor.
///
/// `tick` is called once per frame with the frame's monotonic timestamp.
/// When at least one second has passed since the anchor, it returns a
/// sample, advances the anchor by exactly one second, and resets the
/// counter. After a stall longer than a second the counter reports on
/// consecutive ticks until the anchor catches back up to real time.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    anchor: Instant,
    frames: u32,
}

impl FpsCounter {
    /// Creates a counter anchored at `now`.
    pub fn new(now: Instant) -> Self {
        Self { anchor: now, frames: 0 }
    }

    /// Records one frame at `now`; returns a sample when the window closes.
    pub fn tick(&mut self, now: Instant) -> Option<FpsSample> {
        self.frames += 1;
        if now.duration_since(self.anchor) < REPORT_WINDOW {
            return None;
        }
        let sample = FpsSample {
            ms_per_frame: 1000.0 / f64::from(self.frames),
            frames: self.frames,
        };
        self.anchor += REPORT_WINDOW;
        self.frames = 0;
        Some(sample)
    }
}
