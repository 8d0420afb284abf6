//! Routing engine: one compiled configuration plus its strategies.

use std::sync::Arc;

use crate::config::schema::GatewayConfig;
use crate::routing::error::RoutingResult;
use crate::routing::model::ResolvedRoute;
use crate::routing::qos::{DefaultQosOptionsFactory, QosOptionsFactory};
use crate::routing::selector::{ProviderSelector, ResolutionStrategy};
use crate::routing::table::RoutingConfig;
use crate::routing::RouteProvider;

/// Immutable after construction. A configuration reload builds a new engine
/// (with empty dynamic caches) instead of mutating this one.
#[derive(Debug)]
pub struct RoutingEngine {
    config: RoutingConfig,
    selector: ProviderSelector,
}

impl RoutingEngine {
    pub fn new(gateway: &GatewayConfig) -> Self {
        Self::with_qos_factory(gateway, Arc::new(DefaultQosOptionsFactory))
    }

    pub fn with_qos_factory(gateway: &GatewayConfig, qos_factory: Arc<dyn QosOptionsFactory>) -> Self {
        let config = RoutingConfig::from_config(gateway, qos_factory.as_ref());
        let selector = ProviderSelector::new(gateway, &config, qos_factory);

        tracing::info!(
            routes = config.routes.len(),
            strategy = selector.select(&config).name(),
            "Routing engine built"
        );

        Self { config, selector }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// The strategy requests are currently handed to.
    pub fn strategy(&self) -> &ResolutionStrategy {
        self.selector.select(&self.config)
    }

    pub fn resolve(
        &self,
        upstream_path: &str,
        upstream_query: &str,
        method: &str,
        upstream_host: &str,
    ) -> RoutingResult<ResolvedRoute> {
        self.strategy()
            .get(upstream_path, upstream_query, method, &self.config, upstream_host)
    }

    /// Resolve a request target such as `/orders/1?page=2`.
    pub fn resolve_target(
        &self,
        method: &str,
        target: &str,
        upstream_host: &str,
    ) -> RoutingResult<ResolvedRoute> {
        let query = target.find('?').map(|idx| &target[idx..]).unwrap_or("");
        self.resolve(target, query, method, upstream_host)
    }
}
