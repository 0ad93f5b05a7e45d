//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence over the configured level. JSON lines are
//! meant for containers, the pretty format for local runs.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {message}")]
    Filter { filter: String, message: String },

    #[error("logging already initialized: {0}")]
    Init(String),
}

/// Build the level filter from the environment or the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| LoggingError::Filter {
            filter: config.log_level.clone(),
            message: e.to_string(),
        })
}

/// Install the global subscriber.
pub fn init(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let filter = env_filter(config)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))
    }
}
