//! Response reader: find one named element and decode it.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;

use crate::gateway::error::{GatewayError, GatewayResult};

/// Return the source text of the first element whose local name is `target`.
pub fn locate_node<'a>(xml: &'a str, target: &str) -> GatewayResult<&'a str> {
    let mut reader = Reader::from_str(xml);

    loop {
        let start = position(&reader)?;
        match reader.read_event() {
            Ok(Event::Start(element)) if element.local_name().as_ref() == target.as_bytes() => {
                let end = element.to_end().into_owned();
                reader.read_to_end(end.name()).map_err(|e| {
                    GatewayError::ResponseDecode(format!("unterminated <{target}>: {e}"))
                })?;
                return Ok(&xml[start..position(&reader)?]);
            }
            Ok(Event::Empty(element)) if element.local_name().as_ref() == target.as_bytes() => {
                return Ok(&xml[start..position(&reader)?]);
            }
            Ok(Event::Eof) => return Err(GatewayError::ResponseNodeNotFound(target.to_string())),
            Ok(_) => {}
            Err(e) => {
                return Err(GatewayError::ResponseDecode(format!(
                    "malformed response while looking for <{target}>: {e}"
                )))
            }
        }
    }
}

/// Locate `target` in `bytes` and deserialize it into `T`.
pub fn decode_node<T: DeserializeOwned>(bytes: &[u8], target: &str) -> GatewayResult<T> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| GatewayError::ResponseDecode(format!("response is not UTF-8: {e}")))?;
    let fragment = locate_node(xml, target)?;
    quick_xml::de::from_str(fragment)
        .map_err(|e| GatewayError::ResponseDecode(format!("<{target}>: {e}")))
}

fn position(reader: &Reader<&[u8]>) -> GatewayResult<usize> {
    usize::try_from(reader.buffer_position())
        .map_err(|e| GatewayError::ResponseDecode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    const NESTED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <KeyRateXMLResponse xmlns="http://web.cbr.ru/">
      <KeyRateXMLResult>
        <KeyRate xmlns=""><KR><DT>2023-06-22T00:00:00+03:00</DT><Rate>7.50</Rate></KR></KeyRate>
      </KeyRateXMLResult>
    </KeyRateXMLResponse>
  </soap:Body>
</soap:Envelope>"#;

    #[derive(Debug, Deserialize)]
    struct Strict {
        #[serde(rename = "Missing")]
        #[allow(dead_code)]
        missing: String,
    }

    #[derive(Debug, Deserialize)]
    struct Kr {
        #[serde(rename = "Rate")]
        rate: String,
    }

    #[derive(Debug, Deserialize)]
    struct KeyRate {
        #[serde(rename = "KR", default)]
        rows: Vec<Kr>,
    }

    #[test]
    fn test_locate_returns_exact_subtree() {
        let fragment = locate_node(NESTED, "KeyRate").unwrap();
        assert_eq!(
            fragment,
            r#"<KeyRate xmlns=""><KR><DT>2023-06-22T00:00:00+03:00</DT><Rate>7.50</Rate></KR></KeyRate>"#
        );
    }

    #[test]
    fn test_locate_matches_local_name() {
        let fragment = locate_node(NESTED, "Body").unwrap();
        assert!(fragment.starts_with("<soap:Body>"));
        assert!(fragment.ends_with("</soap:Body>"));
    }

    #[test]
    fn test_locate_empty_element() {
        let xml = "<Envelope><Result><KeyRate/></Result></Envelope>";
        assert_eq!(locate_node(xml, "KeyRate").unwrap(), "<KeyRate/>");
    }

    #[test]
    fn test_missing_node() {
        let err = locate_node(NESTED, "ValuteData").unwrap_err();
        assert!(matches!(err, GatewayError::ResponseNodeNotFound(node) if node == "ValuteData"));
    }

    #[test]
    fn test_decode_node() {
        let decoded: KeyRate = decode_node(NESTED.as_bytes(), "KeyRate").unwrap();
        assert_eq!(decoded.rows.len(), 1);
        assert_eq!(decoded.rows[0].rate, "7.50");
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let err = decode_node::<Strict>(NESTED.as_bytes(), "KeyRate").unwrap_err();
        assert!(matches!(err, GatewayError::ResponseDecode(_)));
    }

    #[test]
    fn test_non_utf8_is_decode_error() {
        let err = decode_node::<KeyRate>(&[0xff, 0xfe, 0x00], "KeyRate").unwrap_err();
        assert!(matches!(err, GatewayError::ResponseDecode(_)));
    }

    #[test]
    fn test_unterminated_target_is_decode_error() {
        let err = locate_node("<a><KeyRate><KR>", "KeyRate").unwrap_err();
        assert!(matches!(err, GatewayError::ResponseDecode(_)));
    }
}
