//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_cache_hits_total` (counter): resolutions served from cache, by strategy
//! - `router_cache_misses_total` (counter): resolutions synthesized on a miss, by strategy
//! - `router_cache_entries` (gauge): entries in the most recently written cache
//! - `router_strategy_selected_total` (counter): strategy selections
//!
//! # Design Decisions
//! - Uses the `metrics` facade; without an installed recorder every call is a no-op
//! - Prometheus exporter is opt-in through `ObservabilityConfig`

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_cache_hit(strategy: &'static str) {
    counter!("router_cache_hits_total", "strategy" => strategy).increment(1);
}

pub fn record_cache_miss(strategy: &'static str) {
    counter!("router_cache_misses_total", "strategy" => strategy).increment(1);
}

pub fn record_cache_size(size: usize) {
    gauge!("router_cache_entries").set(size as f64);
}

pub fn record_strategy_selected(strategy: &'static str) {
    counter!("router_strategy_selected_total", "strategy" => strategy).increment(1);
}
