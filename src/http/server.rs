//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with one route per remote operation
//! - Wire up middleware (request ID, tracing, body limit)
//! - Mount admin routes when enabled
//! - Serve until the shutdown coordinator fires

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::admin;
use crate::config::GatewayConfig;
use crate::gateway::Dispatcher;
use crate::http::handlers::{self, RouteRegistrar, WITHOUT_CACHE_PREFIX};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::operations;
use crate::soap::{HttpTransport, TransportError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub config: Arc<GatewayConfig>,
    /// Deadline applied to each inbound request.
    pub request_timeout: Duration,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: GatewayConfig, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
            config: Arc::new(config),
            dispatcher,
            started_at: Utc::now(),
        }
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Build the server with an HTTP transport to the configured endpoint.
    pub fn new(config: GatewayConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(
            config.remote.endpoint.clone(),
            Duration::from_secs(config.remote.timeout_secs),
            config.remote.use_system_proxy,
        )?;
        let dispatcher = Arc::new(Dispatcher::from_config(&config, Arc::new(transport)));
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// Build the server around an existing dispatcher.
    pub fn with_dispatcher(config: GatewayConfig, dispatcher: Arc<Dispatcher>) -> Self {
        let state = AppState::new(config, dispatcher);
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    fn build_router(state: AppState) -> Router {
        let mut registrar = RouteRegistrar::new(Router::new());
        operations::visit_all(&mut registrar);

        let mut router = registrar
            .into_router()
            .route(
                &format!("{WITHOUT_CACHE_PREFIX}/{{operation}}"),
                post(handlers::without_cache),
            )
            .route("/health", get(handlers::health));

        if state.config.admin.enabled {
            router = router.merge(admin::router(state.clone()));
        }

        let max_body_size = state.config.security.max_body_size;
        router
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
                    .layer(RequestBodyLimitLayer::new(max_body_size)),
            )
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            operations = operations::OPERATIONS.len(),
            admin = self.state.config.admin.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
