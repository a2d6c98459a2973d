//! Structured logging setup.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries embedding the breaker
//! - Honor `RUST_LOG`-style level configuration
//!
//! # Design Decisions
//! - Libraries only emit events; installing a subscriber is the host's
//!   call, so this is opt-in
//! - Defaults to `info` when no filter is configured

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber reading the level from the environment.
///
/// Intended for binaries and tests; returns quietly if a subscriber is
/// already set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
