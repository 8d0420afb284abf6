//! Dynamic route resolution with authentication.
//!
//! # Responsibilities
//! - Pre-populate the cache with every configured (template, method) pair
//! - On a cache miss, synthesize a service-discovery route from the path
//! - Decorate synthesized routes with the global auth policy and any
//!   rate-limit policy declared for the same service
//!
//! # Design Decisions
//! - The first path segment is the service name
//! - Concurrent misses on one key may both synthesize; the last write wins
//!   and both values are built from identical inputs
//! - Configured routes are cached as declared and never decorated

use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::cache::RouteCache;
use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::key::build_key;
use crate::routing::model::{
    AuthenticationOptions, DownstreamTarget, ResolvedRoute, Route, UpstreamPathTemplate,
};
use crate::routing::path::{split, strip_query};
use crate::routing::qos::QosOptionsFactory;
use crate::routing::table::RoutingConfig;
use crate::routing::RouteProvider;

/// Resolves every request through the shared cache, synthesizing
/// authenticated service-discovery routes on a miss.
#[derive(Debug)]
pub struct DynamicRouteResolver {
    cache: RouteCache,
    qos_factory: Arc<dyn QosOptionsFactory>,
    authentication: Option<AuthenticationOptions>,
}

impl DynamicRouteResolver {
    pub const NAME: &'static str = "dynamic_with_auth";

    /// Build the resolver and index every configured route.
    pub fn new(
        config: &RoutingConfig,
        qos_factory: Arc<dyn QosOptionsFactory>,
        authentication: Option<AuthenticationOptions>,
    ) -> Self {
        let cache = RouteCache::new();

        for route in &config.routes {
            for method in &route.upstream_http_methods {
                let lb = route
                    .downstream
                    .first()
                    .map(|target| target.load_balancer.clone())
                    .unwrap_or_default();
                let key = build_key(&route.upstream_template.original, method, &lb);
                cache.insert_if_absent(key, ResolvedRoute::new(route.clone()));
            }
        }

        tracing::info!(
            static_entries = cache.len(),
            authenticated = authentication.is_some(),
            "Dynamic route resolver initialized"
        );

        Self {
            cache,
            qos_factory,
            authentication,
        }
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    pub fn authentication(&self) -> Option<&AuthenticationOptions> {
        self.authentication.as_ref()
    }
}

impl RouteProvider for DynamicRouteResolver {
    fn get(
        &self,
        upstream_path: &str,
        _upstream_query: &str,
        method: &str,
        config: &RoutingConfig,
        _upstream_host: &str,
    ) -> RoutingResult<ResolvedRoute> {
        resolve_through_cache(
            &self.cache,
            self.qos_factory.as_ref(),
            self.authentication.as_ref(),
            Self::NAME,
            upstream_path,
            method,
            config,
        )
    }
}

/// Shared cache-or-synthesize flow used by the dynamic strategies.
pub(crate) fn resolve_through_cache(
    cache: &RouteCache,
    qos_factory: &dyn QosOptionsFactory,
    authentication: Option<&AuthenticationOptions>,
    strategy: &'static str,
    upstream_path: &str,
    method: &str,
    config: &RoutingConfig,
) -> RoutingResult<ResolvedRoute> {
    let path = strip_query(upstream_path);
    let split = split(path).ok_or_else(|| RoutingError::MalformedPath(upstream_path.to_string()))?;
    let method = method.to_ascii_uppercase();
    let qualified_path = split.qualified_path();
    let key = build_key(&qualified_path, &method, &config.load_balancer);

    if let Some(hit) = cache.get(&key) {
        metrics::record_cache_hit(strategy);
        return Ok(hit);
    }
    metrics::record_cache_miss(strategy);

    let methods = vec![method];
    let upstream_template = UpstreamPathTemplate::new(path);
    let rate_limit = config.rate_limit_for(split.service_name);

    let target = DownstreamTarget {
        service_name: Some(split.service_name.to_string()),
        downstream_path_template: split.downstream_path.to_string(),
        upstream_path_template: upstream_template.clone(),
        load_balancer_key: key.clone(),
        load_balancer: config.load_balancer.clone(),
        qos: qos_factory.create(&config.qos, &qualified_path, &methods),
        http_handler: config.http_handler.clone(),
        downstream_scheme: config.downstream_scheme.clone(),
        downstream_http_version: config.downstream_http_version.clone(),
        use_service_discovery: true,
        downstream_hosts: Vec::new(),
        authentication: authentication.cloned(),
        is_authenticated: authentication.is_some(),
        rate_limit: rate_limit.cloned().unwrap_or_default(),
    };

    tracing::debug!(
        strategy,
        key = %key,
        service = %split.service_name,
        downstream_path = %split.downstream_path,
        authenticated = target.is_authenticated,
        rate_limited = target.is_rate_limited(),
        "Synthesized downstream route"
    );

    let route = Route {
        upstream_template,
        upstream_http_methods: methods,
        downstream: vec![Arc::new(target)],
    };

    Ok(cache.upsert(key, ResolvedRoute::new(Arc::new(route))))
}
