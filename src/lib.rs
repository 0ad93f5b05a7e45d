//! JSON gateway in front of the central bank's DailyInfo SOAP service.
//!
//! Every remote method is exposed as `POST /<MethodName>`. Results are
//! cached per method and request body; a deny-list can switch methods off.

pub mod admin;
pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod operations;
pub mod soap;

pub use config::GatewayConfig;
pub use gateway::{Dispatcher, GatewayError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
