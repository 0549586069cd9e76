//! Boot — logging init.
//!
//! Logs always go to stderr; stdout is reserved for the report.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::conf::{LogStyle, LoggingConfig};

/// Phase 1: basic tracing so config loading can log.
/// Uses `set_default` (thread-local) so phase 2 can install the global subscriber.
pub fn init_logging_basic() -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Phase 2: global subscriber honouring the configured level and style.
/// `RUST_LOG` still wins over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogStyle::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogStyle::Pretty => {
            let layer = fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}
