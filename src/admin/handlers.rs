use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::http::server::AppState;
use crate::operations::{OperationDescriptor, OPERATIONS};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: i64,
    pub remote_endpoint: String,
    pub operations: usize,
    pub cache_entries: usize,
    pub denied: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    /// 0 means unbounded.
    pub capacity: usize,
    pub ttl_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct OperationStatus {
    #[serde(flatten)]
    pub descriptor: OperationDescriptor,
    pub prohibited: bool,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let dispatcher = &state.dispatcher;
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        started_at: state.started_at,
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        remote_endpoint: state.config.remote.endpoint.clone(),
        operations: OPERATIONS.len(),
        cache_entries: dispatcher.cache().len(),
        denied: dispatcher.permissions().names(),
    })
}

pub async fn get_cache(State(state): State<AppState>) -> Json<CacheStats> {
    let dispatcher = &state.dispatcher;
    Json(CacheStats {
        entries: dispatcher.cache().len(),
        capacity: dispatcher.cache().capacity(),
        ttl_secs: dispatcher.ttl().as_secs(),
    })
}

pub async fn clear_cache(State(state): State<AppState>) -> Json<serde_json::Value> {
    let cleared = state.dispatcher.cache().clear();
    tracing::info!(cleared, "Cache cleared by admin request");
    Json(serde_json::json!({ "cleared": cleared }))
}

pub async fn get_operations(State(state): State<AppState>) -> Json<Vec<OperationStatus>> {
    let permissions = state.dispatcher.permissions();
    Json(
        OPERATIONS
            .iter()
            .map(|descriptor| OperationStatus {
                descriptor: *descriptor,
                prohibited: permissions.is_prohibited(descriptor.name),
            })
            .collect(),
    )
}
