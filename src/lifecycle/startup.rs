//! Startup orchestration.
//!
//! Fail fast: any startup error is fatal. The listener binds last so traffic
//! only arrives once the dispatcher is wired.

use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;

use crate::config::{self, validation, ConfigError, GatewayConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};
use crate::soap::TransportError;

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("logging: {0}")]
    Logging(#[from] logging::LoggingError),

    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the configuration file, or fall back to defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => config::load_config(path),
        None => Ok(GatewayConfig::default()),
    }
}

/// Run the gateway until a shutdown signal arrives.
pub async fn run(config: GatewayConfig) -> Result<(), StartupError> {
    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cbr-gateway starting");

    tracing::info!(
        bind_address = %config.listener.bind_address,
        remote = %config.remote.endpoint,
        ttl_secs = config.cache.ttl_secs,
        request_timeout_secs = config.timeouts.request_secs,
        denied = %config.permissions.deny_list,
        "Configuration loaded"
    );
    for name in validation::unknown_deny_list_names(&config) {
        tracing::warn!(operation = name, "Deny-list names an unknown operation");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone())?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, receiver).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_path() {
        let config = resolve_config(None).unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
    }
}
