//! Outbound envelope assembly.
//!
//! The skeleton is serialized with a reserved slot element in the body. The
//! serialized text is split on that slot's exact form and the payload
//! fragment is written between the two halves. If the split does not yield
//! exactly two pieces the envelope is rejected.

use serde::Serialize;

use crate::gateway::error::{GatewayError, GatewayResult};

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Content type of every outbound call.
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

const SLOT_TAG: &str = "gateway-payload-slot";
const SLOT_TOKEN: &str = "__GATEWAY_PAYLOAD_SLOT__";

#[derive(Serialize)]
#[serde(rename = "soap:Envelope")]
struct Skeleton<'a> {
    #[serde(rename = "@xmlns:xsi")]
    xsi: &'a str,
    #[serde(rename = "@xmlns:xsd")]
    xsd: &'a str,
    #[serde(rename = "@xmlns:soap")]
    soap: &'a str,
    #[serde(rename = "soap:Body")]
    body: SkeletonBody<'a>,
}

#[derive(Serialize)]
struct SkeletonBody<'a> {
    #[serde(rename = "gateway-payload-slot")]
    slot: &'a str,
}

fn slot_marker() -> String {
    format!("<{SLOT_TAG}>{SLOT_TOKEN}</{SLOT_TAG}>")
}

/// Serialize `value` as an XML element named `root`.
pub fn serialize_fragment<T: Serialize>(root: &str, value: &T) -> GatewayResult<String> {
    quick_xml::se::to_string_with_root(root, value)
        .map_err(|e| GatewayError::EnvelopeAssembly(format!("serializing <{root}>: {e}")))
}

/// Wrap a serialized payload fragment in the SOAP envelope.
pub fn splice(fragment: &str) -> GatewayResult<String> {
    if fragment.contains(SLOT_TOKEN) {
        return Err(GatewayError::EnvelopeAssembly(
            "payload contains the reserved slot token".to_string(),
        ));
    }

    let skeleton = quick_xml::se::to_string(&Skeleton {
        xsi: XSI_NS,
        xsd: XSD_NS,
        soap: SOAP_ENVELOPE_NS,
        body: SkeletonBody { slot: SLOT_TOKEN },
    })
    .map_err(|e| GatewayError::EnvelopeAssembly(format!("serializing envelope: {e}")))?;

    splice_into(&skeleton, &slot_marker(), fragment)
}

fn splice_into(skeleton: &str, marker: &str, fragment: &str) -> GatewayResult<String> {
    let pieces: Vec<&str> = skeleton.split(marker).collect();
    let [head, tail] = pieces.as_slice() else {
        return Err(GatewayError::EnvelopeAssembly(format!(
            "expected 2 pieces around the payload slot, got {}",
            pieces.len()
        )));
    };

    let mut envelope = String::with_capacity(head.len() + fragment.len() + tail.len());
    envelope.push_str(head);
    envelope.push_str(fragment);
    envelope.push_str(tail);
    Ok(envelope)
}
