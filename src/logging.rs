//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with the report on stdout. The
//! filter is read from `PROMISIFY_LOG` (same syntax as `RUST_LOG`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PROMISIFY_LOG";

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let default = if verbose { "promisify=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
