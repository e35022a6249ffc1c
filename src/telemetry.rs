//! Logging setup for hosts embedding the editor.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "planboard=info";

/// Install a formatted `tracing` subscriber honoring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed, so tests
/// and hosts with their own subscriber can call it freely.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
