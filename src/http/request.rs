//! Request identification and per-request context.

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use std::time::Duration;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::gateway::RequestContext;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The request ID header value, or "unknown".
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Build the pipeline context for one inbound request.
pub fn request_context(headers: &HeaderMap, timeout: Duration) -> RequestContext {
    RequestContext::new()
        .with_timeout(timeout)
        .with_request_id(request_id(headers))
}
