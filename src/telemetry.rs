//! Tracing subscriber initialisation.

use crate::config::TelemetryConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable whose `EnvFilter` directive overrides the configured
/// log filter.
pub const LOG_ENV: &str = "WORKFORCE_LOG";

/// Error raised when the global subscriber cannot be installed.
#[derive(Debug, Error)]
#[error("failed to initialise tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Builds the log filter: `WORKFORCE_LOG` when set and valid, otherwise the
/// configured directive, otherwise `info`.
#[must_use]
pub fn log_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`TelemetryError`] when a global subscriber is already set.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config))
        .with_ansi(config.ansi)
        .try_init()
        .map_err(|err| TelemetryError(err.to_string()))
}
