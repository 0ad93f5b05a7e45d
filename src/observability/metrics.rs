//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): pipeline runs by operation, outcome
//! - `gateway_request_duration_seconds` (histogram): pipeline latency
//! - `gateway_cache_events_total` (counter): hit, miss, stale, type_mismatch,
//!   stored, replaced, store_failed, invalidated
//! - `gateway_remote_calls_total` (counter): remote calls by outcome
//! - `gateway_cache_entries` (gauge): current cache size
//!
//! Without an installed recorder every call here is a no-op.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished pipeline run.
pub fn record_request(operation: &str, outcome: &'static str, start: Instant) {
    let operation = operation.to_string();
    ::metrics::counter!(
        "gateway_requests_total",
        "operation" => operation.clone(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("gateway_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_event(operation: &str, event: &'static str) {
    ::metrics::counter!(
        "gateway_cache_events_total",
        "operation" => operation.to_string(),
        "event" => event
    )
    .increment(1);
}

pub fn record_remote_call(operation: &str, outcome: &'static str) {
    ::metrics::counter!(
        "gateway_remote_calls_total",
        "operation" => operation.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_cache_size(entries: usize) {
    ::metrics::gauge!("gateway_cache_entries").set(entries as f64);
}
