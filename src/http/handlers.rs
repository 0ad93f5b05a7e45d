//! Handlers for the operation routes.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::http::request::{request_context, request_id};
use crate::http::response::{error_response, fetched_response, temporary_redirect};
use crate::http::server::AppState;
use crate::operations::{Operation, OperationDescriptor, OperationVisitor};

/// Prefix of the forced-refresh routes.
pub const WITHOUT_CACHE_PREFIX: &str = "/GetMethodDataWithoutCache";

/// Registers `POST /<name>` for every visited operation.
pub struct RouteRegistrar {
    router: Router<AppState>,
}

impl RouteRegistrar {
    pub fn new(router: Router<AppState>) -> Self {
        Self { router }
    }

    pub fn into_router(self) -> Router<AppState> {
        self.router
    }
}

impl OperationVisitor for RouteRegistrar {
    fn visit<O: Operation>(&mut self) {
        let path = format!("/{}", O::DESCRIPTOR.name);
        let router = std::mem::take(&mut self.router);
        self.router = router.route(&path, post(call_operation::<O>));
    }
}

/// Run `O` through the dispatcher.
///
/// The request context is cancelled when this future is dropped, so a client
/// that disconnects mid-call never leaves a cache entry behind.
pub async fn call_operation<O: Operation>(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let ctx = request_context(&headers, state.request_timeout);
    let _cancel_on_drop = ctx.token().clone().drop_guard();

    match state.dispatcher.handle::<O>(&ctx, &body).await {
        Ok(fetched) => fetched_response(&fetched),
        Err(e) => e.into_response(),
    }
}

/// Drop the cached result for this operation and body, then send the client
/// back to the normal route. Prohibited operations keep their entries.
pub async fn without_cache(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(descriptor) = OperationDescriptor::find(&operation) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("unknown operation: {operation}"),
        );
    };

    let removed = !state.dispatcher.permissions().is_prohibited(descriptor.name)
        && state.dispatcher.invalidate(descriptor, &body);
    tracing::debug!(
        request_id = %request_id(&headers),
        operation = descriptor.name,
        removed,
        "Cache entry invalidated"
    );
    temporary_redirect(&format!("/{}", descriptor.name))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "no such route")
}
