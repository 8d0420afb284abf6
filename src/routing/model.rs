//! Runtime routing types.
//!
//! Built from [`crate::config`] once per configuration and shared behind
//! `Arc`. Nothing here is mutated after construction.

use std::sync::Arc;

use serde::Serialize;

use crate::config::schema::{
    AuthenticationConfig, HostAndPort, HttpHandlerConfig, LoadBalancerConfig, RateLimitConfig,
};
use crate::routing::key::STICKY_SESSIONS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadBalancerOptions {
    pub lb_type: String,
    pub key: String,
    pub expiry_ms: u64,
}

impl LoadBalancerOptions {
    /// Both the sticky-session type and a session key are present.
    pub fn is_sticky(&self) -> bool {
        !self.key.is_empty() && self.lb_type == STICKY_SESSIONS
    }
}

impl From<&LoadBalancerConfig> for LoadBalancerOptions {
    fn from(config: &LoadBalancerConfig) -> Self {
        Self {
            lb_type: config.lb_type.clone(),
            key: config.key.clone(),
            expiry_ms: config.expiry_ms,
        }
    }
}

/// Circuit breaking and timeout policy for one downstream call site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QosOptions {
    /// Identifies the circuit breaker shared by requests with this key.
    pub key: String,
    pub exceptions_allowed_before_breaking: u32,
    pub duration_of_break_ms: u64,
    pub timeout_ms: u64,
}

impl QosOptions {
    pub fn use_qos(&self) -> bool {
        self.exceptions_allowed_before_breaking > 0 || self.timeout_ms > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpHandlerOptions {
    pub allow_auto_redirect: bool,
    pub use_cookie_container: bool,
    pub use_tracing: bool,
    pub use_proxy: bool,
    pub max_connections_per_server: usize,
}

impl From<&HttpHandlerConfig> for HttpHandlerOptions {
    fn from(config: &HttpHandlerConfig) -> Self {
        Self {
            allow_auto_redirect: config.allow_auto_redirect,
            use_cookie_container: config.use_cookie_container,
            use_tracing: config.use_tracing,
            use_proxy: config.use_proxy,
            max_connections_per_server: config.max_connections_per_server,
        }
    }
}

impl Default for HttpHandlerOptions {
    fn default() -> Self {
        Self::from(&HttpHandlerConfig::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthenticationOptions {
    pub provider_key: String,
    pub allowed_scopes: Vec<String>,
}

impl From<&AuthenticationConfig> for AuthenticationOptions {
    fn from(config: &AuthenticationConfig) -> Self {
        Self {
            provider_key: config.provider_key.clone(),
            allowed_scopes: config.allowed_scopes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLimitOptions {
    pub enabled: bool,
    pub client_whitelist: Vec<String>,
    pub period: String,
    pub period_timespan_secs: f64,
    pub limit: u64,
}

impl From<&RateLimitConfig> for RateLimitOptions {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            client_whitelist: config.client_whitelist.clone(),
            period: config.period.clone(),
            period_timespan_secs: config.period_timespan_secs,
            limit: config.limit,
        }
    }
}

impl Default for RateLimitOptions {
    fn default() -> Self {
        Self::from(&RateLimitConfig::default())
    }
}

/// Upstream path pattern as written in configuration, or the literal request
/// path for synthesized routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpstreamPathTemplate {
    pub original: String,
    pub host: Option<String>,
    pub priority: u32,
}

impl UpstreamPathTemplate {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            ..Default::default()
        }
    }
}

/// Everything needed to forward a request to one downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownstreamTarget {
    pub service_name: Option<String>,
    pub downstream_path_template: String,
    pub upstream_path_template: UpstreamPathTemplate,
    pub load_balancer_key: String,
    pub load_balancer: LoadBalancerOptions,
    pub qos: QosOptions,
    pub http_handler: HttpHandlerOptions,
    pub downstream_scheme: String,
    pub downstream_http_version: String,
    pub use_service_discovery: bool,
    pub downstream_hosts: Vec<HostAndPort>,
    pub authentication: Option<AuthenticationOptions>,
    pub is_authenticated: bool,
    pub rate_limit: RateLimitOptions,
}

impl DownstreamTarget {
    pub fn is_rate_limited(&self) -> bool {
        self.rate_limit.enabled
    }
}

/// An upstream template, the methods it accepts, and its downstream targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub upstream_template: UpstreamPathTemplate,
    /// Upper-cased; empty accepts any method.
    pub upstream_http_methods: Vec<String>,
    pub downstream: Vec<Arc<DownstreamTarget>>,
}

/// A `{name}` placeholder and the value it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub name: String,
    pub value: String,
}

/// The unit handed back to the request pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    pub placeholders: Vec<Placeholder>,
    pub route: Arc<Route>,
}

impl ResolvedRoute {
    pub fn new(route: Arc<Route>) -> Self {
        Self {
            placeholders: Vec::new(),
            route,
        }
    }

    /// First downstream target; every route built by this crate has one.
    pub fn target(&self) -> Option<&DownstreamTarget> {
        self.route.downstream.first().map(Arc::as_ref)
    }
}
