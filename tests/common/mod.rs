//! Shared fixtures for integration tests.
#![allow(dead_code)]

use route_resolver::config::{AuthenticationConfig, GatewayConfig, RouteConfig};

/// A configured route served by a discovered service.
pub fn service_route(template: &str, methods: &[&str], service: &str) -> RouteConfig {
    RouteConfig {
        upstream_path_template: template.to_string(),
        upstream_http_methods: methods.iter().map(|m| m.to_string()).collect(),
        service_name: Some(service.to_string()),
        downstream_path_template: template.to_string(),
        ..Default::default()
    }
}

/// A template-less route that only carries a rate-limit policy.
pub fn rate_limit_stub(service: &str, limit: u64) -> RouteConfig {
    let mut route = RouteConfig {
        service_name: Some(service.to_string()),
        ..Default::default()
    };
    route.rate_limit.enabled = true;
    route.rate_limit.limit = limit;
    route
}

/// Dynamic routing on, optionally with a global auth policy.
pub fn dynamic_config(auth: bool) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.global.enable_dynamic_routing = true;
    if auth {
        config.global.authentication = Some(AuthenticationConfig {
            provider_key: "Bearer".into(),
            allowed_scopes: vec!["api".into()],
        });
    }
    config
}

/// Dynamic routing off, service discovery configured.
pub fn discovery_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.global.service_discovery.provider_type = "Consul".into();
    config.global.service_discovery.host = "consul".into();
    config.global.service_discovery.port = 8500;
    config
}
