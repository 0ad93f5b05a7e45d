//! Configuration schema definitions.
//!
//! Every section has defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::soap::{DateLayouts, SERVICE_NAMESPACE};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Inbound listener.
    pub listener: ListenerConfig,

    /// Remote SOAP service.
    pub remote: RemoteConfig,

    /// Date layouts used on the wire.
    pub dates: DateLayouts,

    pub cache: CacheConfig,

    pub permissions: PermissionsConfig,

    pub timeouts: TimeoutConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,

    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where and how the SOAP service is reached.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Full URL of the service endpoint.
    pub endpoint: String,

    /// Timeout for a single remote call in seconds.
    pub timeout_secs: u64,

    /// Prefix of the `SOAPAction` header and request element namespace.
    pub soap_action_namespace: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` for outbound calls.
    pub use_system_proxy: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.cbr.ru/DailyInfoWebServ/DailyInfo.asmx".to_string(),
            timeout_secs: 15,
            soap_action_namespace: SERVICE_NAMESPACE.to_string(),
            use_system_proxy: true,
        }
    }
}

/// Result cache settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Age at which an entry becomes stale.
    pub ttl_secs: u64,

    /// Entry limit; 0 means unbounded.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            max_entries: 10_000,
        }
    }
}

/// Operation deny-list.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Space-separated operation names. Empty allows everything.
    pub deny_list: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for a whole inbound request in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Emit JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin endpoints configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the `/admin` routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // Placeholder; validation rejects it when admin is enabled.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.remote.soap_action_namespace, "http://web.cbr.ru/");
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.dates.request_layout, "%Y-%m-%d");
        assert!(config.permissions.deny_list.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [cache]
            ttl_secs = 300

            [permissions]
            deny_list = "KeyRateXML NewsInfoXML"

            [dates]
            request_layout = "%d.%m.%Y"
            "#,
        )
        .unwrap();

        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.cache.max_entries, 10_000);
        assert_eq!(config.permissions.deny_list, "KeyRateXML NewsInfoXML");
        assert_eq!(config.dates.request_layout, "%d.%m.%Y");
        assert_eq!(config.dates.response_layout, "%Y-%m-%dT%H:%M:%S");
    }
}
