//! Route lookup against the configured table.
//!
//! # Responsibilities
//! - Filter routes by method and host
//! - Match upstream templates and extract placeholders
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Templates compiled at construction, immutable afterwards
//! - Higher priority checked first; ties keep declaration order
//! - Explicit NoRouteFound rather than silent default

use std::sync::Arc;

use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::matcher::{HostMatcher, PathTemplateMatcher};
use crate::routing::model::{ResolvedRoute, Route};
use crate::routing::path::strip_query;
use crate::routing::table::RoutingConfig;
use crate::routing::RouteProvider;

#[derive(Debug)]
struct CompiledRoute {
    route: Arc<Route>,
    host: HostMatcher,
    path: PathTemplateMatcher,
}

impl CompiledRoute {
    fn accepts_method(&self, method: &str) -> bool {
        self.route.upstream_http_methods.is_empty()
            || self.route.upstream_http_methods.iter().any(|m| m == method)
    }
}

/// Matches requests against explicitly configured routes only.
#[derive(Debug)]
pub struct DownstreamRouteFinder {
    routes: Vec<CompiledRoute>,
}

impl DownstreamRouteFinder {
    pub const NAME: &'static str = "plain_finder";

    pub fn new(config: &RoutingConfig) -> Self {
        let mut routes: Vec<CompiledRoute> = config
            .routes
            .iter()
            .filter(|route| !route.upstream_template.original.is_empty())
            .map(|route| CompiledRoute {
                route: route.clone(),
                host: HostMatcher::new(route.upstream_template.host.as_deref()),
                path: PathTemplateMatcher::new(&route.upstream_template.original),
            })
            .collect();
        // Stable sort keeps declaration order within a priority.
        routes.sort_by(|a, b| {
            b.route
                .upstream_template
                .priority
                .cmp(&a.route.upstream_template.priority)
        });

        Self { routes }
    }
}

impl RouteProvider for DownstreamRouteFinder {
    fn get(
        &self,
        upstream_path: &str,
        _upstream_query: &str,
        method: &str,
        _config: &RoutingConfig,
        upstream_host: &str,
    ) -> RoutingResult<ResolvedRoute> {
        let path = strip_query(upstream_path);
        if !path.starts_with('/') {
            return Err(RoutingError::MalformedPath(upstream_path.to_string()));
        }
        let method = method.to_ascii_uppercase();

        for compiled in &self.routes {
            if !compiled.accepts_method(&method) || !compiled.host.matches(upstream_host) {
                continue;
            }
            if let Some(placeholders) = compiled.path.matches(path) {
                return Ok(ResolvedRoute {
                    placeholders,
                    route: compiled.route.clone(),
                });
            }
        }

        tracing::debug!(method = %method, path = %path, host = %upstream_host, "No route matched");
        Err(RoutingError::NoRouteFound {
            method,
            path: path.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{GatewayConfig, RouteConfig};
    use crate::routing::qos::DefaultQosOptionsFactory;

    fn route(template: &str, methods: &[&str], service: &str) -> RouteConfig {
        RouteConfig {
            upstream_path_template: template.into(),
            upstream_http_methods: methods.iter().map(|m| m.to_string()).collect(),
            service_name: Some(service.into()),
            ..Default::default()
        }
    }

    fn finder(routes: Vec<RouteConfig>) -> (DownstreamRouteFinder, RoutingConfig) {
        let gateway = GatewayConfig {
            routes,
            ..Default::default()
        };
        let config = RoutingConfig::from_config(&gateway, &DefaultQosOptionsFactory);
        (DownstreamRouteFinder::new(&config), config)
    }

    fn service_of(resolved: &ResolvedRoute) -> &str {
        resolved.target().unwrap().service_name.as_deref().unwrap()
    }

    #[test]
    fn test_matches_template_and_extracts_placeholders() {
        let (finder, config) = finder(vec![route("/orders/{id}", &["GET"], "orders")]);

        let resolved = finder.get("/orders/42?x=1", "?x=1", "get", &config, "").unwrap();
        assert_eq!(service_of(&resolved), "orders");
        assert_eq!(resolved.placeholders[0].name, "{id}");
        assert_eq!(resolved.placeholders[0].value, "42");
    }

    #[test]
    fn test_method_filter() {
        let (finder, config) = finder(vec![
            route("/orders", &["POST"], "writer"),
            route("/orders", &[], "any"),
        ]);

        let post = finder.get("/orders", "", "POST", &config, "").unwrap();
        assert_eq!(service_of(&post), "writer");
        let get = finder.get("/orders", "", "GET", &config, "").unwrap();
        assert_eq!(service_of(&get), "any");
    }

    #[test]
    fn test_priority_order() {
        let mut specific = route("/orders/new", &["GET"], "specific");
        specific.priority = 1;
        let (finder, config) = finder(vec![route("/orders/{id}", &["GET"], "generic"), specific]);

        let resolved = finder.get("/orders/new", "", "GET", &config, "").unwrap();
        assert_eq!(service_of(&resolved), "specific");
    }

    #[test]
    fn test_host_filter() {
        let mut scoped = route("/orders", &["GET"], "scoped");
        scoped.upstream_host = Some("api.example.com".into());
        let (finder, config) = finder(vec![scoped, route("/orders", &["GET"], "default")]);

        let matched = finder.get("/orders", "", "GET", &config, "API.example.com").unwrap();
        assert_eq!(service_of(&matched), "scoped");
        let fallback = finder.get("/orders", "", "GET", &config, "other.com").unwrap();
        assert_eq!(service_of(&fallback), "default");
    }

    #[test]
    fn test_no_match() {
        let (finder, config) = finder(vec![route("/orders", &["GET"], "orders")]);

        assert_eq!(
            finder.get("/users", "", "GET", &config, ""),
            Err(RoutingError::NoRouteFound {
                method: "GET".into(),
                path: "/users".into()
            })
        );
        assert!(matches!(
            finder.get("users", "", "GET", &config, ""),
            Err(RoutingError::MalformedPath(_))
        ));
    }
}
