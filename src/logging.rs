//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`, so stdout carries only the
//! report. `RUST_LOG` overrides the configured level when it is set.

use tracing_subscriber::EnvFilter;

/// Build the filter for a configured level
pub fn build_filter(level: &str) -> EnvFilter {
    let default = format!("{level},gapsim={level}", level = level.to_lowercase());
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber
///
/// A second call is a no-op, so tests and embedding callers can call it freely.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .try_init();
}
