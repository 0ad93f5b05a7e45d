//! Response shaping for the JSON surface.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::json;

use crate::gateway::{Fetched, GatewayError};

pub const X_CACHE: &str = "x-cache";
pub const X_CACHE_CREATED_AT: &str = "x-cache-created-at";

/// `{"error": "<reason phrase> (<detail>)"}` with the given status.
pub fn error_response(status: StatusCode, detail: impl std::fmt::Display) -> Response {
    let reason = status.canonical_reason().unwrap_or("Error");
    (status, Json(json!({ "error": format!("{reason} ({detail})") }))).into_response()
}

/// Every pipeline failure is reported as a 500.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self)
    }
}

/// Serialize a pipeline result with its cache provenance headers.
pub fn fetched_response<T: Serialize>(fetched: &Fetched<T>) -> Response {
    let mut response = Json(fetched.payload.as_ref()).into_response();
    let headers = response.headers_mut();
    headers.insert(
        X_CACHE,
        HeaderValue::from_static(if fetched.from_cache { "hit" } else { "miss" }),
    );
    let created_at = fetched.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    if let Ok(value) = HeaderValue::from_str(&created_at) {
        headers.insert(X_CACHE_CREATED_AT, value);
    }
    response
}

/// `307 Temporary Redirect` to `location`; clients repeat method and body.
pub fn temporary_redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
