//! Date layouts for inbound JSON and outbound XML.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::gateway::error::{GatewayError, GatewayResult};

/// strftime layouts used when reading request dates and writing SOAP dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateLayouts {
    /// Layout of dates in inbound JSON bodies.
    pub request_layout: String,

    /// Layout of date-times exchanged with the remote service.
    pub response_layout: String,
}

impl Default for DateLayouts {
    fn default() -> Self {
        Self {
            request_layout: "%Y-%m-%d".to_string(),
            response_layout: "%Y-%m-%dT%H:%M:%S".to_string(),
        }
    }
}

impl DateLayouts {
    /// Parse a request date, reporting the offending field on failure.
    pub fn parse_request(&self, field: &str, value: &str) -> GatewayResult<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), &self.request_layout).map_err(|e| {
            GatewayError::BadRawData(format!("{field} {value:?} does not match {}: {e}", self.request_layout))
        })
    }

    /// Render a date at midnight in the response layout.
    pub fn format_response(&self, date: NaiveDate) -> GatewayResult<String> {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| GatewayError::BadRawData(format!("{date} has no midnight")))?;
        let mut out = String::new();
        write!(out, "{}", midnight.format(&self.response_layout)).map_err(|_| {
            GatewayError::EnvelopeAssembly(format!("invalid response layout {:?}", self.response_layout))
        })?;
        Ok(out)
    }
}

/// Whether `layout` is a well-formed strftime pattern.
pub fn is_valid_layout(layout: &str) -> bool {
    !layout.is_empty() && !StrftimeItems::new(layout).any(|item| matches!(item, Item::Error))
}
