//! Time source abstraction.
//!
//! # Responsibilities
//! - Supply "now" to the state machine and the rolling counters
//! - Allow tests to drive time deterministically
//!
//! # Design Decisions
//! - Single injected clock shared by the state machine and all counters,
//!   so advancing a test clock moves open-state expiry and window decay
//!   together
//! - No background ticking; the clock is only read when the breaker is
//!   called

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// The default clock, backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A manually-driven clock for deterministic tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
        })
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("manual clock mutex poisoned");
        *now += by;
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, to: Instant) {
        let mut now = self.now.lock().expect("manual clock mutex poisoned");
        *now = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().expect("manual clock mutex poisoned")
    }
}
