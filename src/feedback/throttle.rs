//! Repaint throttling and time sources.

use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Whether enough time has passed since the last repaint.
///
/// `forced` short-circuits the check; callers pass it for terminal states
/// such as a completed bar, which must always be painted.
pub fn should_render(
    now: Instant,
    last_render: Instant,
    min_interval: Duration,
    forced: bool,
) -> bool {
    forced || now.saturating_duration_since(last_render) >= min_interval
}

/// Source of "now" for throttling and ETA maths.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Lets progress simulations run at full speed while the bar sees
/// realistic gaps between updates.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Start at the current instant.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}
