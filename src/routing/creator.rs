//! Service-discovery route creation without authentication.
//!
//! Used when the routing table declares no upstream templates and a
//! discovery backend is configured: every request is routed by its first
//! path segment. Nothing is pre-populated and no auth is attached.

use std::sync::Arc;

use crate::routing::cache::RouteCache;
use crate::routing::dynamic::resolve_through_cache;
use crate::routing::error::RoutingResult;
use crate::routing::model::ResolvedRoute;
use crate::routing::qos::QosOptionsFactory;
use crate::routing::table::RoutingConfig;
use crate::routing::RouteProvider;

#[derive(Debug)]
pub struct DownstreamRouteCreator {
    cache: RouteCache,
    qos_factory: Arc<dyn QosOptionsFactory>,
}

impl DownstreamRouteCreator {
    pub const NAME: &'static str = "static_no_auth";

    pub fn new(qos_factory: Arc<dyn QosOptionsFactory>) -> Self {
        Self {
            cache: RouteCache::new(),
            qos_factory,
        }
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }
}

impl RouteProvider for DownstreamRouteCreator {
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
            None,
            Self::NAME,
            upstream_path,
            method,
            config,
        )
    }
}
