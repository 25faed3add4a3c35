//! Diagnostic logging setup
//!
//! Diagnostics go to stderr so they never mix with command output. The
//! filter comes from `FINSIGHT_LOG` (EnvFilter syntax) and otherwise from
//! the verbosity flag.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FINSIGHT_LOG";

/// Default filter directive for a verbosity setting
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "finsight=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
