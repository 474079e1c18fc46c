//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` events. Hosts call
//! [`init_logging`] once at startup; `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter used when neither the host nor `RUST_LOG` picks one.
pub const DEFAULT_DIRECTIVE: &str = "scratchpad=info";

/// Install a formatted subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`. Returns false if a global subscriber was already set.
pub fn init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .is_ok()
}

/// Subscriber for tests: output goes through the test harness capture.
pub fn init_test_logging() -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(EnvFilter::new("scratchpad=debug"))
        .try_init()
        .is_ok()
}
