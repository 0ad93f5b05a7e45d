//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, per-request context)
//!     → handlers.rs (one route per operation, forced refresh, health)
//!     → gateway::Dispatcher
//!     → response.rs (JSON body, cache headers, error shape)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
