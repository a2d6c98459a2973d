//! Rolling time-window counters.
//!
//! # Responsibilities
//! - Maintain decaying per-second totals over a fixed trailing window
//! - Expire stale buckets lazily on access (no background task)
//!
//! # Design Decisions
//! - Fixed ring of 1-second buckets; window length decides bucket count
//! - Each counter carries its own lock; counters never share locks with
//!   the breaker state machine
//! - Reads can expire buckets too, so a sum taken after a quiet period
//!   reflects only the trailing window

pub mod rolling;

pub use rolling::{sum, RollingWindow};
