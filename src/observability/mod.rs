//! Observability helpers.
//!
//! # Responsibilities
//! - Initialize the logging subsystem for hosts that want it
//! - Record breaker metrics through the `metrics` facade
//!
//! # Design Decisions
//! - The crate emits through the `tracing` and `metrics` facades only;
//!   no subscriber or recorder is installed implicitly and no exporter
//!   is wired
//! - Metric updates are counter increments at decision sites, cheap
//!   enough to sit on the allow/transition paths

pub mod logging;
pub mod metrics;
