//! The breaker state machine.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::breaker::counts::Counts;
use crate::breaker::options::{BreakerBuilder, Options};
use crate::breaker::state::State;
use crate::clock::Clock;
use crate::error::BreakerError;
use crate::observability::metrics;
use crate::window::{sum, RollingWindow};

const BUCKET_WIDTH: Duration = Duration::from_secs(1);

/// State and transition timestamp, mutated together under one lock so a
/// transition and its notification are atomic relative to other
/// transitions.
struct Shared {
    current: State,
    last_change: Instant,
}

/// A circuit breaker over rolling time windows.
///
/// The breaker never executes the guarded call. Callers ask for
/// permission with [`allow`](Self::allow), run the call themselves, and
/// report the outcome through the returned [`Permit`]. All time-driven
/// behavior is evaluated lazily on `state()`/`allow()`; there is no
/// background timer, so a breaker that stops receiving calls also stops
/// advancing state.
pub struct Breaker {
    options: Options,
    clock: Arc<dyn Clock>,
    shared: Mutex<Shared>,
    requests: RollingWindow,
    total_successes: RollingWindow,
    total_failures: RollingWindow,
    consecutive_successes: AtomicU64,
    consecutive_failures: AtomicU64,
}

impl Breaker {
    /// Create a breaker with default options.
    pub fn new() -> Self {
        BreakerBuilder::new().build()
    }

    /// Start configuring a breaker.
    pub fn builder() -> BreakerBuilder {
        BreakerBuilder::new()
    }

    pub(crate) fn from_parts(options: Options, clock: Arc<dyn Clock>) -> Self {
        let requests = RollingWindow::new(options.window, BUCKET_WIDTH, clock.clone());
        let total_successes = RollingWindow::new(options.window, BUCKET_WIDTH, clock.clone());
        let total_failures = RollingWindow::new(options.window, BUCKET_WIDTH, clock.clone());

        Self {
            shared: Mutex::new(Shared {
                current: State::Closed,
                last_change: clock.now(),
            }),
            requests,
            total_successes,
            total_failures,
            consecutive_successes: AtomicU64::new(0),
            consecutive_failures: AtomicU64::new(0),
            options,
            clock,
        }
    }

    /// Current state.
    ///
    /// Reading the state is the sole mechanism by which an expired Open
    /// period ends: if the open timeout has elapsed, this read performs
    /// the Open → Half-Open transition and returns `HalfOpen`.
    pub fn state(&self) -> State {
        let mut shared = self.lock_shared();

        if shared.current == State::Open {
            let now = self.clock.now();
            if now.duration_since(shared.last_change) >= self.options.timeout {
                self.switch_state(&mut shared, State::Open, State::HalfOpen);
            }
        }

        shared.current
    }

    /// Request permission for one call.
    ///
    /// On success the call is counted against the rolling request window
    /// and a [`Permit`] is returned; the caller runs the guarded
    /// operation and reports its outcome via [`Permit::record`].
    ///
    /// While half-open, admission is budgeted against the rolling window
    /// rather than in-flight calls: once `max_requests` grants have been
    /// counted in the trailing window, further calls are denied with
    /// [`BreakerError::TooManyRequests`] until the window decays.
    pub fn allow(&self) -> Result<Permit<'_>, BreakerError> {
        match self.state() {
            State::Open => {
                tracing::debug!(state = %State::Open, "call rejected");
                metrics::record_rejection("open");
                return Err(BreakerError::Open);
            }
            State::HalfOpen => {
                if self.requests.reduce(sum) >= self.options.max_requests {
                    tracing::debug!(state = %State::HalfOpen, "probe budget exhausted");
                    metrics::record_rejection("too_many_requests");
                    return Err(BreakerError::TooManyRequests);
                }
            }
            State::Closed => {}
        }

        self.requests.append(1);

        Ok(Permit { breaker: self })
    }

    /// Snapshot the rolling sums and consecutive streaks.
    ///
    /// This is the same view handed to the trip predicate. The rolling
    /// counters are read independently of the state lock, so a snapshot
    /// taken during concurrent reports may be off by an in-flight append.
    pub fn counts(&self) -> Counts {
        Counts {
            requests: self.requests.reduce(sum),
            total_successes: self.total_successes.reduce(sum),
            total_failures: self.total_failures.reduce(sum),
            consecutive_successes: self.consecutive_successes.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
        }
    }

    /// Configured half-open probe budget.
    pub fn max_requests(&self) -> u64 {
        self.options.max_requests
    }

    /// Configured rolling window span.
    pub fn window(&self) -> Duration {
        self.options.window
    }

    /// Configured open-state duration.
    pub fn timeout(&self) -> Duration {
        self.options.timeout
    }

    fn after_call(&self, success: bool) {
        // Time may have advanced since allow(); re-evaluate so a report
        // landing after the open timeout sees HalfOpen, not Open.
        let state = self.state();

        if success {
            self.on_success();
            if state == State::HalfOpen {
                let streak = self.consecutive_successes.load(Ordering::Relaxed);
                if streak >= self.options.max_requests {
                    self.set_state(State::Closed);
                }
            }
            return;
        }

        self.on_failure();

        match state {
            State::Closed => {
                if (self.options.ready_to_trip)(self.counts()) {
                    self.set_state(State::Open);
                }
            }
            // Any probe failure reopens immediately; the trip predicate
            // is never consulted while half-open.
            State::HalfOpen => self.set_state(State::Open),
            State::Open => {}
        }
    }

    fn on_success(&self) {
        self.total_successes.append(1);
        self.consecutive_successes.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    fn on_failure(&self) {
        self.total_failures.append(1);
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
        self.consecutive_successes.store(0, Ordering::Relaxed);
    }

    fn set_state(&self, to: State) {
        let mut shared = self.lock_shared();
        let from = shared.current;
        self.switch_state(&mut shared, from, to);
    }

    /// Perform a transition. Must hold the state lock; no-op when `from`
    /// and `to` coincide. The notifier runs while the lock is held and
    /// must not call back into the breaker.
    fn switch_state(&self, shared: &mut MutexGuard<'_, Shared>, from: State, to: State) {
        if from == to {
            return;
        }

        shared.last_change = self.clock.now();
        shared.current = to;

        if to == State::Open {
            tracing::warn!(%from, %to, "circuit breaker opened");
        } else {
            tracing::info!(%from, %to, "circuit breaker state changed");
        }
        metrics::record_transition(from, to);

        (self.options.on_state_change)(from, to);
    }

    fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().expect("breaker state mutex poisoned")
    }
}

impl Default for Breaker {
    fn default() -> Self {
        Self::new()
    }
}

/// Permission for a single guarded call.
///
/// Obtained from [`Breaker::allow`]; consumed by
/// [`record`](Self::record), which reports the outcome exactly once.
/// Dropping a permit without recording leaves its request-window
/// contribution to decay with the window.
#[must_use = "report the call outcome with Permit::record"]
pub struct Permit<'a> {
    breaker: &'a Breaker,
}

impl Permit<'_> {
    /// Report whether the guarded call succeeded.
    pub fn record(self, success: bool) {
        self.breaker.after_call(success);
    }
}

impl fmt::Debug for Permit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permit").finish_non_exhaustive()
    }
}
