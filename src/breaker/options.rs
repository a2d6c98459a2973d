//! Breaker configuration and construction.

use std::sync::Arc;
use std::time::Duration;

use crate::breaker::counts::Counts;
use crate::breaker::machine::Breaker;
use crate::breaker::state::State;
use crate::clock::{Clock, SystemClock};

/// Trip predicate: decides Closed → Open after a failure report.
pub type TripPredicate = Box<dyn Fn(Counts) -> bool + Send + Sync>;

/// State-change notifier, invoked synchronously on every transition.
pub type StateChangeHook = Box<dyn Fn(State, State) + Send + Sync>;

/// The default trip predicate: trip once more than 5 consecutive
/// failures have accumulated.
pub fn default_ready_to_trip(counts: Counts) -> bool {
    counts.consecutive_failures > 5
}

/// Resolved breaker options. Immutable after construction.
pub(crate) struct Options {
    pub(crate) max_requests: u64,
    pub(crate) window: Duration,
    pub(crate) timeout: Duration,
    pub(crate) ready_to_trip: TripPredicate,
    pub(crate) on_state_change: StateChangeHook,
}

/// Builder for [`Breaker`].
///
/// Out-of-range values are clamped to their minimums at
/// [`build`](Self::build) time rather than rejected.
pub struct BreakerBuilder {
    max_requests: u64,
    window: Duration,
    timeout: Duration,
    ready_to_trip: TripPredicate,
    on_state_change: StateChangeHook,
    clock: Arc<dyn Clock>,
}

impl Default for BreakerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakerBuilder {
    pub fn new() -> Self {
        Self {
            max_requests: 1,
            window: Duration::from_secs(60),
            timeout: Duration::from_secs(10),
            ready_to_trip: Box::new(default_ready_to_trip),
            on_state_change: Box::new(|_, _| {}),
            clock: Arc::new(SystemClock),
        }
    }

    /// Maximum rolling-window probe grants while half-open. Minimum 1,
    /// default 1.
    pub fn max_requests(mut self, max_requests: u64) -> Self {
        self.max_requests = max_requests;
        self
    }

    /// Span over which requests, successes and failures are aggregated.
    /// Minimum 1s, default 60s.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// How long the breaker stays open before probing is allowed.
    /// Minimum 1s, default 10s.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Predicate evaluated after each failure reported while closed; a
    /// `true` return opens the circuit. Default: more than 5 consecutive
    /// failures.
    pub fn ready_to_trip<F>(mut self, predicate: F) -> Self
    where
        F: Fn(Counts) -> bool + Send + Sync + 'static,
    {
        self.ready_to_trip = Box::new(predicate);
        self
    }

    /// Hook invoked on every state transition, while the state lock is
    /// held. The hook must not call back into the breaker. Default no-op.
    pub fn on_state_change<F>(mut self, hook: F) -> Self
    where
        F: Fn(State, State) + Send + Sync + 'static,
    {
        self.on_state_change = Box::new(hook);
        self
    }

    /// Replace the time source. Intended for deterministic tests.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Breaker {
        let options = Options {
            max_requests: self.max_requests.max(1),
            window: self.window.max(Duration::from_secs(1)),
            timeout: self.timeout.max(Duration::from_secs(1)),
            ready_to_trip: self.ready_to_trip,
            on_state_change: self.on_state_change,
        };
        Breaker::from_parts(options, self.clock)
    }
}
