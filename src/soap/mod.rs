//! SOAP framing for the remote service.
//!
//! # Data Flow
//! ```text
//! typed request
//!     → RequestShape::write_xml (payload fragment, service namespace)
//!     → envelope.rs (splice fragment into the envelope skeleton)
//!     → transport.rs (POST with SOAPAction)
//!     → reader.rs (locate target node, deserialize)
//!     → typed response
//! ```

pub mod dates;
pub mod envelope;
pub mod reader;
pub mod transport;

use serde::de::DeserializeOwned;

use crate::gateway::error::GatewayResult;
use crate::operations::requests::RequestShape;

pub use dates::DateLayouts;
pub use transport::{HttpTransport, SoapRequest, SoapTransport, TransportError};

/// Namespace of the remote DailyInfo service.
pub const SERVICE_NAMESPACE: &str = "http://web.cbr.ru/";

/// Builds outbound envelopes and reads inbound responses.
#[derive(Debug, Clone)]
pub struct EnvelopeCodec {
    namespace: String,
    layouts: DateLayouts,
}

impl Default for EnvelopeCodec {
    fn default() -> Self {
        Self::new(SERVICE_NAMESPACE, DateLayouts::default())
    }
}

impl EnvelopeCodec {
    pub fn new(namespace: impl Into<String>, layouts: DateLayouts) -> Self {
        Self {
            namespace: namespace.into(),
            layouts,
        }
    }

    pub fn layouts(&self) -> &DateLayouts {
        &self.layouts
    }

    /// Assemble the wire request for `operation`.
    pub fn encode<R: RequestShape>(&self, operation: &str, request: &R) -> GatewayResult<SoapRequest> {
        let fragment = request.write_xml(operation, &self.namespace, &self.layouts)?;
        let body = envelope::splice(&fragment)?;
        Ok(SoapRequest {
            action: format!("{}{}", self.namespace, operation),
            content_type: envelope::CONTENT_TYPE,
            body,
        })
    }

    /// Decode the first `target_node` element of a response.
    pub fn decode<T: DeserializeOwned>(&self, response: &[u8], target_node: &str) -> GatewayResult<T> {
        reader::decode_node(response, target_node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::error::GatewayError;
    use crate::operations::currency::CursOnDateData;
    use crate::operations::requests::{DateRange, Empty, OnDate};
    use crate::operations::Sanitize;

    const CURS_ON_DATE: &str = include_str!("../../tests/fixtures/curs_on_date.xml");

    #[test]
    fn test_golden_envelope() {
        let codec = EnvelopeCodec::default();
        let request = OnDate::parse(br#"{"OnDate":"2023-06-22"}"#, codec.layouts()).unwrap();
        let soap = codec.encode("GetCursOnDateXML", &request).unwrap();

        assert_eq!(
            soap.body,
            "<soap:Envelope xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
             xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">\
             <soap:Body>\
             <GetCursOnDateXML xmlns=\"http://web.cbr.ru/\"><On_date>2023-06-22T00:00:00</On_date></GetCursOnDateXML>\
             </soap:Body></soap:Envelope>"
        );
        assert_eq!(soap.action, "http://web.cbr.ru/GetCursOnDateXML");
        assert_eq!(soap.content_type, "text/xml; charset=utf-8");
    }

    #[test]
    fn test_date_range_fragment() {
        let codec = EnvelopeCodec::default();
        let request = DateRange::parse(
            br#"{"FromDate":"2023-06-01","ToDate":"2023-06-22"}"#,
            codec.layouts(),
        )
        .unwrap();
        let soap = codec.encode("KeyRateXML", &request).unwrap();
        assert!(soap.body.contains(
            "<KeyRateXML xmlns=\"http://web.cbr.ru/\"><fromDate>2023-06-01T00:00:00</fromDate>\
             <ToDate>2023-06-22T00:00:00</ToDate></KeyRateXML>"
        ));
    }

    #[test]
    fn test_parameterless_fragment() {
        let codec = EnvelopeCodec::default();
        let request = Empty::parse(b"{}", codec.layouts()).unwrap();
        let soap = codec.encode("MainInfoXML", &request).unwrap();
        assert!(soap.body.contains("<MainInfoXML xmlns=\"http://web.cbr.ru/\""));
        assert!(soap.body.ends_with("</soap:Body></soap:Envelope>"));
    }

    #[test]
    fn test_custom_namespace_drives_action() {
        let codec = EnvelopeCodec::new("urn:test/", DateLayouts::default());
        let request = Empty::parse(b"", codec.layouts()).unwrap();
        let soap = codec.encode("MainInfoXML", &request).unwrap();
        assert_eq!(soap.action, "urn:test/MainInfoXML");
    }

    #[test]
    fn test_decode_currency_sample() {
        let codec = EnvelopeCodec::default();
        let mut data: CursOnDateData = codec.decode(CURS_ON_DATE.as_bytes(), "ValuteData").unwrap();
        data.sanitize();

        assert_eq!(data.rates.len(), 2);
        let aud = &data.rates[0];
        assert_eq!(aud.name, "Australian Dollar");
        assert_eq!(aud.code, "36");
        assert_eq!(aud.rate, "57.1445");
        assert_eq!(aud.char_code, "AUD");
        let azn = &data.rates[1];
        assert_eq!(azn.name, "Azerbaijani Manat");
        assert_eq!(azn.code, "944");
        assert_eq!(azn.rate, "49.5169");
    }

    #[test]
    fn test_decode_missing_node() {
        let codec = EnvelopeCodec::default();
        let err = codec
            .decode::<CursOnDateData>(CURS_ON_DATE.as_bytes(), "KeyRate")
            .unwrap_err();
        assert!(matches!(err, GatewayError::ResponseNodeNotFound(_)));
    }
}
