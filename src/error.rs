//! Error definitions.

use thiserror::Error;

/// Errors returned when the breaker denies a call.
///
/// Both variants are signalled only from [`Breaker::allow`]; outcome
/// reporting never fails.
///
/// [`Breaker::allow`]: crate::breaker::Breaker::allow
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BreakerError {
    /// The circuit is open; fail fast without attempting the call.
    #[error("circuit breaker is open")]
    Open,

    /// The circuit is half-open and the probe budget for the current
    /// rolling window is spent. Semantically distinct from `Open` so
    /// callers can tell "cooling down" from "probing at capacity".
    #[error("too many requests")]
    TooManyRequests,
}
