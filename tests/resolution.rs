//! End-to-end resolution through `RoutingEngine`.

use std::sync::Arc;
use std::thread;

use route_resolver::routing::key::STICKY_SESSIONS;
use route_resolver::{RoutingEngine, RoutingError};

mod common;

#[test]
fn test_unknown_service_resolves_dynamically() {
    let engine = RoutingEngine::new(&common::dynamic_config(false));

    let resolved = engine.resolve("/orders/123?x=1", "?x=1", "GET", "gw").unwrap();
    let target = resolved.target().unwrap();

    assert_eq!(target.service_name.as_deref(), Some("orders"));
    assert_eq!(target.downstream_path_template, "/123");
    assert_eq!(target.load_balancer_key, "/orders/123|GET");
    assert!(target.use_service_discovery);
    assert!(!target.is_authenticated);
    assert!(!target.is_rate_limited());
}

#[test]
fn test_sticky_session_key_is_shared_across_methods() {
    let mut config = common::dynamic_config(false);
    config.global.load_balancer.lb_type = STICKY_SESSIONS.into();
    config.global.load_balancer.key = "sess1".into();
    let engine = RoutingEngine::new(&config);

    let first = engine.resolve("/orders", "", "GET", "").unwrap();
    let second = engine.resolve("/billing/7", "", "POST", "").unwrap();

    assert_eq!(first.target().unwrap().load_balancer_key, "CookieStickySessions:sess1");
    assert!(Arc::ptr_eq(&first.route, &second.route));
}

#[test]
fn test_configured_route_is_served_from_index() {
    let mut config = common::dynamic_config(true);
    config.routes.push(common::service_route("/health", &["GET"], "health"));
    let engine = RoutingEngine::new(&config);

    let resolved = engine.resolve("/health", "", "GET", "").unwrap();
    assert!(Arc::ptr_eq(&resolved.route, &engine.config().routes[0]));
    assert!(!resolved.target().unwrap().is_authenticated);

    // A method the route does not declare goes through synthesis instead.
    let post = engine.resolve("/health", "", "POST", "").unwrap();
    assert!(!Arc::ptr_eq(&post.route, &engine.config().routes[0]));
    assert!(post.target().unwrap().is_authenticated);
}

#[test]
fn test_decoration_follows_configuration() {
    let mut config = common::dynamic_config(true);
    config.routes.push(common::rate_limit_stub("orders", 10));
    let engine = RoutingEngine::new(&config);

    let orders = engine.resolve("/orders/1", "", "GET", "").unwrap();
    let target = orders.target().unwrap();
    assert!(target.is_authenticated);
    assert_eq!(target.authentication.as_ref().unwrap().provider_key, "Bearer");
    assert!(target.is_rate_limited());
    assert_eq!(target.rate_limit.limit, 10);

    let users = engine.resolve("/users/1", "", "GET", "").unwrap();
    assert!(users.target().unwrap().is_authenticated);
    assert!(!users.target().unwrap().is_rate_limited());
}

#[test]
fn test_resolution_is_idempotent() {
    let engine = RoutingEngine::new(&common::dynamic_config(true));

    let first = engine.resolve_target("GET", "/catalog/items/9?sort=asc", "").unwrap();
    let second = engine.resolve_target("GET", "/catalog/items/9?sort=asc", "").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_misses_converge() {
    let engine = Arc::new(RoutingEngine::new(&common::dynamic_config(true)));

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                scope.spawn(move || engine.resolve("/orders/42", "", "GET", "").unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let settled = engine.resolve("/orders/42", "", "GET", "").unwrap();
    for resolved in &results {
        assert_eq!(resolved, &settled);
    }
    // Later reads all see the single stored value.
    let again = engine.resolve("/orders/42", "", "GET", "").unwrap();
    assert!(Arc::ptr_eq(&settled.route, &again.route));
}

#[test]
fn test_discovery_without_templates_uses_creator() {
    let mut config = common::discovery_config();
    config.global.authentication = Some(Default::default());
    let engine = RoutingEngine::new(&config);
    assert_eq!(engine.strategy().name(), "static_no_auth");

    let resolved = engine.resolve("/orders/1", "", "GET", "").unwrap();
    assert!(resolved.target().unwrap().use_service_discovery);
    assert!(!resolved.target().unwrap().is_authenticated);
}

#[test]
fn test_plain_finder_matches_configured_table_only() {
    let mut config = common::discovery_config();
    config.routes.push(common::service_route("/orders/{id}", &["GET"], "orders"));
    let engine = RoutingEngine::new(&config);
    assert_eq!(engine.strategy().name(), "plain_finder");

    let resolved = engine.resolve("/orders/5", "", "GET", "").unwrap();
    assert_eq!(resolved.placeholders[0].value, "5");

    assert!(matches!(
        engine.resolve("/users/5", "", "GET", ""),
        Err(RoutingError::NoRouteFound { .. })
    ));
}

#[test]
fn test_new_engine_starts_with_fresh_cache() {
    let config = common::dynamic_config(false);
    let before = RoutingEngine::new(&config);
    let old = before.resolve("/orders/1", "", "GET", "").unwrap();

    let mut updated = config.clone();
    updated.global.authentication = Some(route_resolver::config::AuthenticationConfig {
        provider_key: "Bearer".into(),
        allowed_scopes: vec![],
    });
    let after = RoutingEngine::new(&updated);
    let new = after.resolve("/orders/1", "", "GET", "").unwrap();

    assert!(!old.target().unwrap().is_authenticated);
    assert!(new.target().unwrap().is_authenticated);
}
