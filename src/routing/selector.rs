//! Resolution strategy selection.

use std::sync::Arc;

use crate::config::schema::GatewayConfig;
use crate::observability::metrics;
use crate::routing::creator::DownstreamRouteCreator;
use crate::routing::dynamic::DynamicRouteResolver;
use crate::routing::error::RoutingResult;
use crate::routing::finder::DownstreamRouteFinder;
use crate::routing::model::{AuthenticationOptions, ResolvedRoute};
use crate::routing::qos::QosOptionsFactory;
use crate::routing::table::RoutingConfig;
use crate::routing::RouteProvider;

/// The ways a request can be resolved.
#[derive(Debug)]
pub enum ResolutionStrategy {
    /// Route by first path segment through service discovery, no auth.
    StaticNoAuth(DownstreamRouteCreator),
    /// Configured routes from cache, everything else synthesized with auth.
    DynamicWithAuth(DynamicRouteResolver),
    /// Match the configured table only.
    PlainFinder(DownstreamRouteFinder),
}

impl ResolutionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ResolutionStrategy::StaticNoAuth(_) => DownstreamRouteCreator::NAME,
            ResolutionStrategy::DynamicWithAuth(_) => DynamicRouteResolver::NAME,
            ResolutionStrategy::PlainFinder(_) => DownstreamRouteFinder::NAME,
        }
    }
}

impl RouteProvider for ResolutionStrategy {
    fn get(
        &self,
        upstream_path: &str,
        upstream_query: &str,
        method: &str,
        config: &RoutingConfig,
        upstream_host: &str,
    ) -> RoutingResult<ResolvedRoute> {
        match self {
            ResolutionStrategy::StaticNoAuth(p) => {
                p.get(upstream_path, upstream_query, method, config, upstream_host)
            }
            ResolutionStrategy::DynamicWithAuth(p) => {
                p.get(upstream_path, upstream_query, method, config, upstream_host)
            }
            ResolutionStrategy::PlainFinder(p) => {
                p.get(upstream_path, upstream_query, method, config, upstream_host)
            }
        }
    }
}

/// Picks the strategy that handles a routing table.
///
/// All strategies are built up front; the dynamic routing flag and global
/// auth policy are read once here and never change.
#[derive(Debug)]
pub struct ProviderSelector {
    enable_dynamic_routing: bool,
    static_no_auth: ResolutionStrategy,
    dynamic_with_auth: ResolutionStrategy,
    plain_finder: ResolutionStrategy,
}

impl ProviderSelector {
    pub fn new(
        gateway: &GatewayConfig,
        config: &RoutingConfig,
        qos_factory: Arc<dyn QosOptionsFactory>,
    ) -> Self {
        let authentication = gateway
            .global
            .authentication
            .as_ref()
            .map(AuthenticationOptions::from);

        Self {
            enable_dynamic_routing: gateway.global.enable_dynamic_routing,
            static_no_auth: ResolutionStrategy::StaticNoAuth(DownstreamRouteCreator::new(
                qos_factory.clone(),
            )),
            dynamic_with_auth: ResolutionStrategy::DynamicWithAuth(DynamicRouteResolver::new(
                config,
                qos_factory,
                authentication,
            )),
            plain_finder: ResolutionStrategy::PlainFinder(DownstreamRouteFinder::new(config)),
        }
    }

    pub fn select(&self, config: &RoutingConfig) -> &ResolutionStrategy {
        let selected = if self.enable_dynamic_routing {
            &self.dynamic_with_auth
        } else if config.has_no_upstream_templates() && config.service_discovery.is_configured() {
            &self.static_no_auth
        } else {
            &self.plain_finder
        };

        metrics::record_strategy_selected(selected.name());
        selected
    }
}
