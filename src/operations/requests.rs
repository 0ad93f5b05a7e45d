//! Request shapes shared by the operations.
//!
//! Each shape is deserialized from the inbound JSON body, validated, and
//! written as the SOAP payload element named after the operation.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::gateway::error::{GatewayError, GatewayResult};
use crate::soap::dates::DateLayouts;
use crate::soap::envelope::serialize_fragment;

/// Inbound payload of one operation.
pub trait RequestShape: DeserializeOwned + Send + Sync + 'static {
    /// Semantic checks beyond JSON shape.
    fn validate(&self, _layouts: &DateLayouts) -> GatewayResult<()> {
        Ok(())
    }

    /// Serialize as `<operation xmlns="namespace">…</operation>`.
    fn write_xml(&self, operation: &str, namespace: &str, layouts: &DateLayouts) -> GatewayResult<String>;

    /// Parse and validate a raw JSON body. A blank body reads as `{}`.
    fn parse(raw: &[u8], layouts: &DateLayouts) -> GatewayResult<Self>
    where
        Self: Sized,
    {
        let raw: &[u8] = if raw.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            raw
        };
        let request: Self =
            serde_json::from_slice(raw).map_err(|e| GatewayError::BadRawData(e.to_string()))?;
        request.validate(layouts)?;
        Ok(request)
    }
}

/// No parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[derive(Serialize)]
struct EmptyWire<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
}

impl RequestShape for Empty {
    fn write_xml(&self, operation: &str, namespace: &str, _layouts: &DateLayouts) -> GatewayResult<String> {
        serialize_fragment(operation, &EmptyWire { xmlns: namespace })
    }
}

/// A single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnDate {
    #[serde(rename = "OnDate")]
    pub on_date: String,
}

#[derive(Serialize)]
struct OnDateWire<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "On_date")]
    on_date: String,
}

impl RequestShape for OnDate {
    fn validate(&self, layouts: &DateLayouts) -> GatewayResult<()> {
        layouts.parse_request("OnDate", &self.on_date).map(|_| ())
    }

    fn write_xml(&self, operation: &str, namespace: &str, layouts: &DateLayouts) -> GatewayResult<String> {
        let date = layouts.parse_request("OnDate", &self.on_date)?;
        serialize_fragment(
            operation,
            &OnDateWire {
                xmlns: namespace,
                on_date: layouts.format_response(date)?,
            },
        )
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "FromDate")]
    pub from_date: String,
    #[serde(rename = "ToDate")]
    pub to_date: String,
}

#[derive(Serialize)]
struct DateRangeWire<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "fromDate")]
    from_date: String,
    #[serde(rename = "ToDate")]
    to_date: String,
}

fn parse_range(from: &str, to: &str, layouts: &DateLayouts) -> GatewayResult<(NaiveDate, NaiveDate)> {
    let from_date = layouts.parse_request("FromDate", from)?;
    let to_date = layouts.parse_request("ToDate", to)?;
    if from_date > to_date {
        return Err(GatewayError::BadInputDateData {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok((from_date, to_date))
}

impl RequestShape for DateRange {
    fn validate(&self, layouts: &DateLayouts) -> GatewayResult<()> {
        parse_range(&self.from_date, &self.to_date, layouts).map(|_| ())
    }

    fn write_xml(&self, operation: &str, namespace: &str, layouts: &DateLayouts) -> GatewayResult<String> {
        let (from, to) = parse_range(&self.from_date, &self.to_date, layouts)?;
        serialize_fragment(
            operation,
            &DateRangeWire {
                xmlns: namespace,
                from_date: layouts.format_response(from)?,
                to_date: layouts.format_response(to)?,
            },
        )
    }
}

/// A date range for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursDynamic {
    #[serde(rename = "FromDate")]
    pub from_date: String,
    #[serde(rename = "ToDate")]
    pub to_date: String,
    /// Internal currency code, e.g. `R01235`.
    #[serde(rename = "ValutaCode")]
    pub valuta_code: String,
}

#[derive(Serialize)]
struct CursDynamicWire<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "FromDate")]
    from_date: String,
    #[serde(rename = "ToDate")]
    to_date: String,
    #[serde(rename = "ValutaCode")]
    valuta_code: &'a str,
}

impl RequestShape for CursDynamic {
    fn validate(&self, layouts: &DateLayouts) -> GatewayResult<()> {
        if self.valuta_code.trim().is_empty() {
            return Err(GatewayError::BadRawData("ValutaCode must not be empty".to_string()));
        }
        parse_range(&self.from_date, &self.to_date, layouts).map(|_| ())
    }

    fn write_xml(&self, operation: &str, namespace: &str, layouts: &DateLayouts) -> GatewayResult<String> {
        let (from, to) = parse_range(&self.from_date, &self.to_date, layouts)?;
        serialize_fragment(
            operation,
            &CursDynamicWire {
                xmlns: namespace,
                from_date: layouts.format_response(from)?,
                to_date: layouts.format_response(to)?,
                valuta_code: self.valuta_code.trim(),
            },
        )
    }
}

/// Currency directory selector: `false` for daily, `true` for monthly quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValutesRequest {
    #[serde(rename = "Seld", default)]
    pub seld: bool,
}

#[derive(Serialize)]
struct EnumValutesWire<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "Seld")]
    seld: bool,
}

impl RequestShape for EnumValutesRequest {
    fn write_xml(&self, operation: &str, namespace: &str, _layouts: &DateLayouts) -> GatewayResult<String> {
        serialize_fragment(
            operation,
            &EnumValutesWire {
                xmlns: namespace,
                seld: self.seld,
            },
        )
    }
}
