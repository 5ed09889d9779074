//! Tracing subscriber setup for binaries and tests embedding the detector.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive (e.g. `chatdrift_analysis=debug`).
pub const LOG_ENV_VAR: &str = "CHATDRIFT_LOG";

/// Install a fmt subscriber filtered by `CHATDRIFT_LOG`, defaulting to `warn`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
