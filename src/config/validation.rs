//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every route can reach a downstream
//! - Validate value ranges and method names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{GatewayConfig, LoadBalancerConfig, RouteConfig};
use crate::routing::key::STICKY_SESSIONS;

const KNOWN_METHODS: &[&str] = &[
    "GET", "HEAD", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "TRACE", "CONNECT",
];

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route {index}: upstream path template {template:?} must start with '/'")]
    TemplateMissingSlash { index: usize, template: String },

    #[error("route {index}: unknown HTTP method {method:?}")]
    UnknownMethod { index: usize, method: String },

    #[error("route {index}: needs a service_name or at least one downstream host")]
    NoDownstream { index: usize },

    #[error("route {index}: downstream host {host:?} has port 0")]
    InvalidDownstreamPort { index: usize, host: String },

    #[error("route {index}: rate limit is enabled with a zero limit")]
    ZeroRateLimit { index: usize },

    #[error("{scope}: sticky sessions need a cookie key")]
    StickySessionWithoutKey { scope: String },

    #[error("global: authentication provider_key must not be empty")]
    EmptyAuthenticationProvider,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(auth) = &config.global.authentication {
        if auth.provider_key.is_empty() {
            errors.push(ValidationError::EmptyAuthenticationProvider);
        }
    }
    check_load_balancer(&config.global.load_balancer, "global", &mut errors);

    for (index, route) in config.routes.iter().enumerate() {
        check_route(index, route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_route(index: usize, route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    let template = &route.upstream_path_template;
    // An empty template marks a stub route that only carries policy.
    if !template.is_empty() && !template.starts_with('/') {
        errors.push(ValidationError::TemplateMissingSlash {
            index,
            template: template.clone(),
        });
    }

    for method in &route.upstream_http_methods {
        if !KNOWN_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
            errors.push(ValidationError::UnknownMethod {
                index,
                method: method.clone(),
            });
        }
    }

    let has_service = route
        .service_name
        .as_deref()
        .is_some_and(|name| !name.is_empty());
    if !has_service && route.downstream_hosts.is_empty() {
        errors.push(ValidationError::NoDownstream { index });
    }

    for host in &route.downstream_hosts {
        if host.port == 0 {
            errors.push(ValidationError::InvalidDownstreamPort {
                index,
                host: host.host.clone(),
            });
        }
    }

    if route.rate_limit.enabled && route.rate_limit.limit == 0 {
        errors.push(ValidationError::ZeroRateLimit { index });
    }

    check_load_balancer(&route.load_balancer, &format!("route {}", index), errors);
}

fn check_load_balancer(lb: &LoadBalancerConfig, scope: &str, errors: &mut Vec<ValidationError>) {
    if lb.lb_type == STICKY_SESSIONS && lb.key.is_empty() {
        errors.push(ValidationError::StickySessionWithoutKey {
            scope: scope.to_string(),
        });
    }
}
