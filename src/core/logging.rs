//! Logging setup
//!
//! Installs a `tracing-subscriber` formatter on stderr so the board printed
//! on stdout stays readable. `RUST_LOG` wins over the configured filter.

use crate::core::error::{CoreError, CoreResult};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
pub fn init_logging(default_filter: &str) -> CoreResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| CoreError::LoggingInit {
            message: format!("bad log filter {default_filter:?}: {e}"),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CoreError::LoggingInit {
            message: e.to_string(),
        })
}

/// Run `f` with a temporary warn-level stderr subscriber
///
/// Settings are loaded before the configured filter is known; this keeps
/// their warnings visible.
pub fn with_startup_logging<T>(f: impl FnOnce() -> T) -> T {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}
