//! Per-request cancellation and deadline.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::gateway::error::{GatewayError, GatewayResult};

/// Cancellation signal and optional deadline carried by one inbound request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    request_id: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expire the context `timeout` from now. A timeout too large to
    /// represent leaves the context without a deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("unknown")
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once the token fired or the deadline passed.
    pub fn is_expired(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drive `fut` until it completes, the token fires, or the deadline passes.
    pub async fn run<F: Future>(&self, fut: F) -> GatewayResult<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(GatewayError::RequestExpired),
            _ = sleep_until(self.deadline) => Err(GatewayError::RequestExpired),
            output = fut => Ok(output),
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
