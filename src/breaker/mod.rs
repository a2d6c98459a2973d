//! Circuit breaker state machine.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: downstream assumed down, calls fail fast
//! - Half-Open: limited probes test whether the downstream recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: trip predicate fires after a failure report
//! Open → Half-Open: open timeout elapsed, observed on the next state read
//! Half-Open → Closed: consecutive successes reach max_requests
//! Half-Open → Open: any probe failure
//! ```
//!
//! # Design Decisions
//! - No background timer; the Open → Half-Open transition happens lazily
//!   on the next `state()`/`allow()` call
//! - Half-open probe admission is budgeted against the rolling request
//!   window, not against in-flight calls
//! - The breaker never runs the guarded call; it grants permission and
//!   takes the reported outcome

pub mod counts;
pub mod machine;
pub mod options;
pub mod state;

pub use counts::Counts;
pub use machine::{Breaker, Permit};
pub use options::{default_ready_to_trip, BreakerBuilder};
pub use state::State;
