//! Log subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the given filter (from `--log` or the
//! settings file) is used. Logs go to stderr so they do not interleave with
//! the board printed on stdout.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::core::error::{CoreError, CoreResult};

/// Install the global `tracing` subscriber
pub fn init_logging(default_filter: &str) -> CoreResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter).map_err(|e| CoreError::LogFilter {
            filter: default_filter.to_string(),
            reason: e.to_string(),
        })?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .map_err(|e| CoreError::LoggingInit(e.to_string()))
}
