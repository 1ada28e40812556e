//! CLI infrastructure for the tileworld simulator
//!
//! This module provides the command-line interface for single runs and
//! noise/strategy sweeps, plus logging setup for the binary.

pub mod commands;
pub mod config;
pub mod output;

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or crate
/// debug events when `verbose` is on.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "tileworld=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
