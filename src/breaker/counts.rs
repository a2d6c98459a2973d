//! Outcome count snapshot.

use serde::Serialize;

/// A point-in-time read of the breaker's counters.
///
/// `requests`, `total_successes` and `total_failures` are rolling-window
/// sums as of the snapshot; the consecutive streaks are the current
/// atomic values. Snapshots are built fresh for every trip-predicate
/// evaluation and never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Calls granted within the trailing window.
    pub requests: u64,
    /// Successes reported within the trailing window.
    pub total_successes: u64,
    /// Failures reported within the trailing window.
    pub total_failures: u64,
    /// Successes since the last reported failure.
    pub consecutive_successes: u64,
    /// Failures since the last reported success.
    pub consecutive_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_field_names() {
        let counts = Counts {
            requests: 7,
            total_successes: 4,
            total_failures: 3,
            consecutive_successes: 0,
            consecutive_failures: 2,
        };

        assert_eq!(
            serde_json::to_value(counts).unwrap(),
            serde_json::json!({
                "requests": 7,
                "total_successes": 4,
                "total_failures": 3,
                "consecutive_successes": 0,
                "consecutive_failures": 2,
            })
        );
    }
}
