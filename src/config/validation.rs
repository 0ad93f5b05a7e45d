//! Semantic checks on a deserialized configuration.
//!
//! Serde handles syntax; this module checks values. All problems are
//! collected rather than stopping at the first.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;
use crate::operations::OperationDescriptor;
use crate::soap::dates::is_valid_layout;

/// Upper bound for `remote.timeout_secs` and `timeouts.request_secs`.
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// One rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate `config`, returning every error found.
///
/// Unknown names in the deny-list are not errors; see
/// [`unknown_deny_list_names`].
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    match url::Url::parse(&config.remote.endpoint) {
        Ok(endpoint) if matches!(endpoint.scheme(), "http" | "https") => {}
        Ok(endpoint) => errors.push(ValidationError::new(
            "remote.endpoint",
            format!("unsupported scheme {:?}", endpoint.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("remote.endpoint", e.to_string())),
    }

    check_timeout(&mut errors, "remote.timeout_secs", config.remote.timeout_secs);

    if config.remote.soap_action_namespace.trim().is_empty() {
        errors.push(ValidationError::new("remote.soap_action_namespace", "must not be empty"));
    }

    if !is_valid_layout(&config.dates.request_layout) {
        errors.push(ValidationError::new(
            "dates.request_layout",
            format!("{:?} is not a valid date layout", config.dates.request_layout),
        ));
    }
    if !is_valid_layout(&config.dates.response_layout) {
        errors.push(ValidationError::new(
            "dates.response_layout",
            format!("{:?} is not a valid date layout", config.dates.response_layout),
        ));
    }

    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError::new("cache.ttl_secs", "must be greater than 0"));
    }

    check_timeout(&mut errors, "timeouts.request_secs", config.timeouts.request_secs);

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.admin.enabled
        && (config.admin.api_key.is_empty() || config.admin.api_key == "CHANGE_ME_IN_PRODUCTION")
    {
        errors.push(ValidationError::new(
            "admin.api_key",
            "must be set to a real key when admin is enabled",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Deny-list entries that match no known operation.
pub fn unknown_deny_list_names(config: &GatewayConfig) -> Vec<&str> {
    config
        .permissions
        .deny_list
        .split_whitespace()
        .filter(|name| OperationDescriptor::find(name).is_none())
        .collect()
}

fn check_timeout(errors: &mut Vec<ValidationError>, field: &'static str, secs: u64) {
    if secs == 0 {
        errors.push(ValidationError::new(field, "must be greater than 0"));
    } else if secs > MAX_TIMEOUT_SECS {
        errors.push(ValidationError::new(
            field,
            format!("must be at most {MAX_TIMEOUT_SECS}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(config: &GatewayConfig) -> Vec<&'static str> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = GatewayConfig::default();
        config.cache.ttl_secs = 0;
        config.remote.endpoint = "not a url".to_string();
        config.dates.request_layout = "%Q".to_string();
        config.listener.bind_address = "localhost".to_string();

        assert_eq!(
            fields(&config),
            vec![
                "listener.bind_address",
                "remote.endpoint",
                "dates.request_layout",
                "cache.ttl_secs",
            ]
        );
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = GatewayConfig::default();
        config.remote.endpoint = "ftp://www.cbr.ru/DailyInfo.asmx".to_string();
        assert_eq!(fields(&config), vec!["remote.endpoint"]);
    }

    #[test]
    fn test_admin_requires_real_key() {
        let mut config = GatewayConfig::default();
        config.admin.enabled = true;
        assert_eq!(fields(&config), vec!["admin.api_key"]);

        config.admin.api_key = "s3cret".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(fields(&config), vec!["observability.metrics_address"]);
    }

    #[test]
    fn test_unknown_deny_list_names_are_not_errors() {
        let mut config = GatewayConfig::default();
        config.permissions.deny_list = "KeyRateXML NoSuchOperation".to_string();
        assert!(validate_config(&config).is_ok());
        assert_eq!(unknown_deny_list_names(&config), vec!["NoSuchOperation"]);

        config.permissions.deny_list = "KeyRateXML  MainInfoXML".to_string();
        assert!(unknown_deny_list_names(&config).is_empty());
    }

    #[test]
    fn test_timeouts_are_bounded() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = u64::MAX;
        config.remote.timeout_secs = MAX_TIMEOUT_SECS + 1;
        assert_eq!(
            fields(&config),
            vec!["remote.timeout_secs", "timeouts.request_secs"]
        );

        config.timeouts.request_secs = MAX_TIMEOUT_SECS;
        config.remote.timeout_secs = MAX_TIMEOUT_SECS;
        assert!(validate_config(&config).is_ok());
    }
}
