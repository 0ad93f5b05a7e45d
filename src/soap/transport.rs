//! Outbound HTTP transport to the remote SOAP endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// A fully assembled SOAP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapRequest {
    /// Value of the `SOAPAction` header.
    pub action: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Errors raised while talking to the remote service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request could not be sent or its body read.
    #[error("request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    /// The remote service answered with a non-success status.
    #[error("remote service answered {status}: {body}")]
    Status { status: u16, body: String },

    /// The remote call exceeded the configured timeout.
    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),

    /// The client could not be constructed.
    #[error("transport setup failed: {0}")]
    Setup(String),
}

/// Performs one POST to the remote service and returns the raw response.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn call(&self, request: SoapRequest) -> Result<Bytes, TransportError>;
}

/// Longest slice of an error body echoed back in `TransportError::Status`.
const MAX_ERROR_BODY: usize = 512;

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a client for `endpoint`. With `use_system_proxy` off, proxy
    /// environment variables are ignored.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        use_system_proxy: bool,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().timeout(timeout);
        if !use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }
}

#[async_trait]
impl SoapTransport for HttpTransport {
    async fn call(&self, request: SoapRequest) -> Result<Bytes, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("SOAPAction", request.action)
            .header(reqwest::header::CONTENT_TYPE, request.content_type)
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let end = text
                .char_indices()
                .nth(MAX_ERROR_BODY)
                .map_or(text.len(), |(i, _)| i);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text[..end].trim().to_string(),
            });
        }

        Ok(body)
    }
}

impl HttpTransport {
    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Request {
                endpoint: self.endpoint.clone(),
                message: error.to_string(),
            }
        }
    }
}
