//! Rolling-window circuit breaker.
//!
//! A guard placed in front of calls to an unreliable downstream. It
//! tracks recent outcomes over a rolling time window and, once failures
//! satisfy the trip predicate, fails fast for a cooldown period before
//! cautiously probing recovery.
//!
//! ```no_run
//! use circuit_breaker::{Breaker, BreakerError};
//!
//! fn call_downstream() -> Result<(), std::io::Error> {
//!     // the guarded operation
//!     Ok(())
//! }
//!
//! fn guarded(breaker: &Breaker) -> Result<(), BreakerError> {
//!     let permit = breaker.allow()?;
//!     let outcome = call_downstream();
//!     permit.record(outcome.is_ok());
//!     Ok(())
//! }
//! ```

pub mod breaker;
pub mod clock;
pub mod error;
pub mod observability;
pub mod window;

pub use breaker::{default_ready_to_trip, Breaker, BreakerBuilder, Counts, Permit, State};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::BreakerError;
pub use window::RollingWindow;
