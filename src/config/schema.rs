//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway
//! router. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway router.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Settings that apply to every route, including dynamically created ones.
    pub global: GlobalConfig,

    /// Explicitly declared routes.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Gateway-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Route every request through dynamic resolution.
    pub enable_dynamic_routing: bool,

    /// Scheme used for dynamically resolved downstream calls.
    pub downstream_scheme: String,

    /// HTTP version used for dynamically resolved downstream calls.
    pub downstream_http_version: String,

    /// Authentication required on every dynamically resolved route.
    pub authentication: Option<AuthenticationConfig>,

    /// Service discovery provider settings.
    pub service_discovery: ServiceDiscoveryConfig,

    /// Load balancer settings for dynamic routes.
    pub load_balancer: LoadBalancerConfig,

    /// Default QoS settings.
    pub qos: QosConfig,

    /// HTTP handler settings for downstream calls.
    pub http_handler: HttpHandlerConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enable_dynamic_routing: false,
            downstream_scheme: "http".to_string(),
            downstream_http_version: "1.1".to_string(),
            authentication: None,
            service_discovery: ServiceDiscoveryConfig::default(),
            load_balancer: LoadBalancerConfig::default(),
            qos: QosConfig::default(),
            http_handler: HttpHandlerConfig::default(),
        }
    }
}

/// Authentication requirement attached to a route.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AuthenticationConfig {
    /// Name of the authentication scheme that validates the request.
    pub provider_key: String,

    /// Scopes a caller must hold.
    pub allowed_scopes: Vec<String>,
}

/// Service discovery provider settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceDiscoveryConfig {
    /// Provider type (e.g., "Consul").
    #[serde(rename = "type")]
    pub provider_type: String,

    /// Provider host.
    pub host: String,

    /// Provider port.
    pub port: u16,

    /// Scheme used to reach the provider.
    pub scheme: String,
}

impl ServiceDiscoveryConfig {
    /// True when the settings describe a usable discovery backend.
    pub fn is_configured(&self) -> bool {
        !self.host.is_empty() && self.port > 0 && !self.provider_type.is_empty()
    }
}

/// Load balancer settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoadBalancerConfig {
    /// Strategy name (e.g., "RoundRobin", "CookieStickySessions").
    #[serde(rename = "type")]
    pub lb_type: String,

    /// Sticky session cookie name.
    pub key: String,

    /// Sticky session expiry in milliseconds.
    pub expiry_ms: u64,
}

/// Quality of service settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct QosConfig {
    /// Failures tolerated before the circuit opens.
    pub exceptions_allowed_before_breaking: u32,

    /// How long the circuit stays open, in milliseconds.
    pub duration_of_break_ms: u64,

    /// Downstream call timeout in milliseconds.
    pub timeout_ms: u64,
}

/// HTTP handler settings for downstream calls.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpHandlerConfig {
    pub allow_auto_redirect: bool,
    pub use_cookie_container: bool,
    pub use_tracing: bool,
    pub use_proxy: bool,
    pub max_connections_per_server: usize,
}

impl Default for HttpHandlerConfig {
    fn default() -> Self {
        Self {
            allow_auto_redirect: false,
            use_cookie_container: false,
            use_tracing: false,
            use_proxy: true,
            max_connections_per_server: usize::MAX,
        }
    }
}

/// Rate limiting policy.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Clients exempt from the limit.
    pub client_whitelist: Vec<String>,

    /// Window over which requests are counted (e.g., "1s", "5m").
    pub period: String,

    /// Seconds a client must wait after hitting the limit.
    pub period_timespan_secs: f64,

    /// Maximum requests per period.
    pub limit: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            client_whitelist: Vec::new(),
            period: "1s".to_string(),
            period_timespan_secs: 1.0,
            limit: 100,
        }
    }
}

/// A fixed downstream address.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HostAndPort {
    pub host: String,
    pub port: u16,
}

/// Route configuration mapping an upstream template to a downstream.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    /// Upstream path template (e.g., "/orders/{id}").
    pub upstream_path_template: String,

    /// Accepted HTTP methods; empty accepts any method.
    pub upstream_http_methods: Vec<String>,

    /// Host header to match (exact match).
    pub upstream_host: Option<String>,

    /// Downstream path template.
    pub downstream_path_template: String,

    /// Downstream scheme; falls back to the global scheme.
    pub downstream_scheme: Option<String>,

    /// Service name resolved through service discovery.
    pub service_name: Option<String>,

    /// Fixed downstream addresses when not using service discovery.
    pub downstream_hosts: Vec<HostAndPort>,

    /// Route priority (higher = checked first).
    pub priority: u32,

    pub load_balancer: LoadBalancerConfig,

    /// QoS override; falls back to the global settings.
    pub qos: Option<QosConfig>,

    pub rate_limit: RateLimitConfig,

    pub authentication: Option<AuthenticationConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.global.downstream_scheme, "http");
        assert!(!config.global.enable_dynamic_routing);
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [global]
            enable_dynamic_routing = true

            [global.authentication]
            provider_key = "Bearer"
            allowed_scopes = ["orders.read"]

            [global.service_discovery]
            type = "Consul"
            host = "consul"
            port = 8500

            [global.load_balancer]
            type = "CookieStickySessions"
            key = "sess1"

            [[routes]]
            upstream_path_template = "/health"
            upstream_http_methods = ["Get"]
            downstream_path_template = "/health"
            downstream_hosts = [{ host = "localhost", port = 5000 }]

            [[routes]]
            service_name = "orders"
            rate_limit = { enabled = true, period = "1m", limit = 10 }
        "#;

        let config: GatewayConfig = toml::from_str(raw).unwrap();
        assert!(config.global.enable_dynamic_routing);
        assert_eq!(
            config.global.authentication.as_ref().unwrap().provider_key,
            "Bearer"
        );
        assert!(config.global.service_discovery.is_configured());
        assert_eq!(config.global.load_balancer.lb_type, "CookieStickySessions");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].downstream_hosts[0].port, 5000);
        assert!(config.routes[1].rate_limit.enabled);
        assert_eq!(config.routes[1].rate_limit.limit, 10);
        assert_eq!(config.routes[1].rate_limit.period_timespan_secs, 1.0);
    }

    #[test]
    fn test_service_discovery_requires_all_fields() {
        let mut sd = ServiceDiscoveryConfig {
            provider_type: "Consul".into(),
            host: "consul".into(),
            port: 8500,
            scheme: String::new(),
        };
        assert!(sd.is_configured());

        sd.port = 0;
        assert!(!sd.is_configured());
    }
}
