//! Error taxonomy for the request pipeline.

use thiserror::Error;

use crate::soap::transport::TransportError;

/// Errors that stop the request pipeline.
///
/// Every variant is terminal: the dispatcher never retries and the HTTP
/// boundary maps all of them to a single failure status.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The caller's context was cancelled or its deadline passed.
    #[error("request expired")]
    RequestExpired,

    /// The operation is listed in a non-empty deny-list.
    #[error("method is prohibited: {0}")]
    MethodProhibited(String),

    /// The inbound payload could not be parsed.
    #[error("bad raw data: {0}")]
    BadRawData(String),

    /// A date range whose start lies after its end.
    #[error("bad input date data: {from} is after {to}")]
    BadInputDateData { from: String, to: String },

    /// Splicing the payload into the envelope template failed.
    #[error("envelope assembly failed: {0}")]
    EnvelopeAssembly(String),

    /// The remote call itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response did not contain the expected element.
    #[error("response node <{0}> not found")]
    ResponseNodeNotFound(String),

    /// The located element did not match the expected shape.
    #[error("response decode failed: {0}")]
    ResponseDecode(String),

    /// Remote-stage failure annotated with the operation it belongs to.
    #[error("{operation}: {source}")]
    Operation {
        operation: String,
        #[source]
        source: Box<GatewayError>,
    },
}

/// Result type for pipeline operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Wrap the error with the name of the operation that produced it.
    pub fn in_operation(self, operation: &str) -> Self {
        match self {
            already @ GatewayError::Operation { .. } => already,
            other => GatewayError::Operation {
                operation: operation.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any operation annotation removed.
    pub fn root(&self) -> &GatewayError {
        match self {
            GatewayError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self.root() {
            GatewayError::RequestExpired => "expired",
            GatewayError::MethodProhibited(_) => "prohibited",
            GatewayError::BadRawData(_) | GatewayError::BadInputDateData { .. } => "bad_request",
            GatewayError::EnvelopeAssembly(_) => "envelope",
            GatewayError::Transport(_) => "transport",
            GatewayError::ResponseNodeNotFound(_) | GatewayError::ResponseDecode(_) => "decode",
            GatewayError::Operation { .. } => "operation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_wrapping() {
        let err = GatewayError::ResponseNodeNotFound("ValuteData".into()).in_operation("GetCursOnDateXML");
        assert_eq!(
            err.to_string(),
            "GetCursOnDateXML: response node <ValuteData> not found"
        );
        assert!(matches!(err.root(), GatewayError::ResponseNodeNotFound(node) if node == "ValuteData"));
        assert_eq!(err.kind(), "decode");

        // Wrapping twice keeps the first annotation.
        let twice = err.in_operation("KeyRateXML");
        assert!(twice.to_string().starts_with("GetCursOnDateXML:"));
    }

    #[test]
    fn test_error_display() {
        let err = GatewayError::BadInputDateData {
            from: "2023-06-23".into(),
            to: "2023-06-22".into(),
        };
        assert_eq!(err.to_string(), "bad input date data: 2023-06-23 is after 2023-06-22");
        assert_eq!(
            GatewayError::MethodProhibited("KeyRateXML".into()).to_string(),
            "method is prohibited: KeyRateXML"
        );
    }
}
