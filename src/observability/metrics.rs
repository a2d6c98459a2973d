//! Metric recording.
//!
//! # Metrics
//! - `circuit_breaker_transitions_total` (counter): transitions by from/to
//! - `circuit_breaker_rejections_total` (counter): denied calls by reason

use metrics::counter;

use crate::breaker::state::State;

/// Record a state transition.
pub fn record_transition(from: State, to: State) {
    counter!(
        "circuit_breaker_transitions_total",
        "from" => from.to_string(),
        "to" => to.to_string()
    )
    .increment(1);
}

/// Record a denied call. `reason` is `"open"` or `"too_many_requests"`.
pub fn record_rejection(reason: &'static str) {
    counter!("circuit_breaker_rejections_total", "reason" => reason).increment(1);
}
