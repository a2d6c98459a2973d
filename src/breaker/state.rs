//! Breaker state enum.

use serde::Serialize;
use std::fmt;

/// The three circuit states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum State {
    /// Normal operation; calls pass through and outcomes are counted.
    Closed,
    /// Recovery probing; a bounded number of trial calls is admitted.
    HalfOpen,
    /// Cooling down; every call is rejected until the timeout elapses.
    Open,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::Closed => "closed",
            State::HalfOpen => "half-open",
            State::Open => "open",
        };
        f.write_str(s)
    }
}
