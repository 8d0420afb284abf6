//! Compiled routing table.
//!
//! # Responsibilities
//! - Turn validated `GatewayConfig` routes into runtime `Route`s
//! - Carry the global options dynamic resolution falls back on
//!
//! # Design Decisions
//! - Built once per configuration, immutable afterwards
//! - Methods are upper-cased here so lookups never re-normalize them

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::schema::{GatewayConfig, QosConfig, RouteConfig, ServiceDiscoveryConfig};
use crate::routing::key::build_key;
use crate::routing::model::{
    AuthenticationOptions, DownstreamTarget, HttpHandlerOptions, LoadBalancerOptions,
    RateLimitOptions, Route, UpstreamPathTemplate,
};
use crate::routing::qos::QosOptionsFactory;

/// The routing table plus gateway-wide defaults.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub routes: Vec<Arc<Route>>,
    pub load_balancer: LoadBalancerOptions,
    pub qos: QosConfig,
    pub http_handler: HttpHandlerOptions,
    pub downstream_scheme: String,
    pub downstream_http_version: String,
    pub service_discovery: ServiceDiscoveryConfig,
    /// First enabled rate-limit policy per service name, in declaration order.
    rate_limits: HashMap<String, RateLimitOptions>,
}

impl RoutingConfig {
    pub fn from_config(config: &GatewayConfig, qos_factory: &dyn QosOptionsFactory) -> Self {
        let global = &config.global;
        let routes: Vec<Arc<Route>> = config
            .routes
            .iter()
            .map(|route| Arc::new(compile_route(route, config, qos_factory)))
            .collect();

        let mut rate_limits = HashMap::new();
        for target in routes.iter().flat_map(|route| route.downstream.iter()) {
            if let (Some(service), true) = (&target.service_name, target.rate_limit.enabled) {
                rate_limits
                    .entry(service.clone())
                    .or_insert_with(|| target.rate_limit.clone());
            }
        }

        Self {
            routes,
            rate_limits,
            load_balancer: LoadBalancerOptions::from(&global.load_balancer),
            qos: global.qos.clone(),
            http_handler: HttpHandlerOptions::from(&global.http_handler),
            downstream_scheme: global.downstream_scheme.clone(),
            downstream_http_version: global.downstream_http_version.clone(),
            service_discovery: global.service_discovery.clone(),
        }
    }

    /// All downstream targets in declaration order.
    pub fn downstream_targets(&self) -> impl Iterator<Item = &Arc<DownstreamTarget>> {
        self.routes.iter().flat_map(|route| route.downstream.iter())
    }

    /// Rate-limit policy of the first downstream target for `service` that
    /// has rate limiting enabled.
    pub fn rate_limit_for(&self, service: &str) -> Option<&RateLimitOptions> {
        self.rate_limits.get(service)
    }

    /// True when no route declares an upstream template.
    pub fn has_no_upstream_templates(&self) -> bool {
        self.routes
            .iter()
            .all(|route| route.upstream_template.original.is_empty())
    }
}

fn compile_route(
    route: &RouteConfig,
    config: &GatewayConfig,
    qos_factory: &dyn QosOptionsFactory,
) -> Route {
    let global = &config.global;
    let methods: Vec<String> = route
        .upstream_http_methods
        .iter()
        .map(|m| m.to_ascii_uppercase())
        .collect();

    let upstream_template = UpstreamPathTemplate {
        original: route.upstream_path_template.clone(),
        host: route.upstream_host.clone(),
        priority: route.priority,
    };
    let load_balancer = LoadBalancerOptions::from(&route.load_balancer);
    let load_balancer_key = build_key(
        &route.upstream_path_template,
        &methods.join(","),
        &load_balancer,
    );
    let qos_config = route.qos.as_ref().unwrap_or(&global.qos);
    let service_name = route.service_name.clone().filter(|name| !name.is_empty());
    let authentication = route.authentication.as_ref().map(AuthenticationOptions::from);

    let target = DownstreamTarget {
        use_service_discovery: service_name.is_some(),
        service_name,
        downstream_path_template: route.downstream_path_template.clone(),
        upstream_path_template: upstream_template.clone(),
        load_balancer_key,
        load_balancer,
        qos: qos_factory.create(qos_config, &route.upstream_path_template, &methods),
        http_handler: HttpHandlerOptions::from(&global.http_handler),
        downstream_scheme: route
            .downstream_scheme
            .clone()
            .unwrap_or_else(|| global.downstream_scheme.clone()),
        downstream_http_version: global.downstream_http_version.clone(),
        downstream_hosts: route.downstream_hosts.clone(),
        is_authenticated: authentication.is_some(),
        authentication,
        rate_limit: RateLimitOptions::from(&route.rate_limit),
    };

    Route {
        upstream_template,
        upstream_http_methods: methods,
        downstream: vec![Arc::new(target)],
    }
}
