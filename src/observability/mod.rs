//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and HTTP layer produce:
//!     → logging.rs (structured tracing events, request ID as a field)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;
