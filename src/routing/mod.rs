//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, query, method, host)
//!     → engine.rs (owns RoutingConfig + ProviderSelector)
//!     → selector.rs (pick strategy)
//!     → dynamic.rs / creator.rs:
//!           path.rs (service name + downstream path)
//!           key.rs (cache key)
//!           cache.rs (hit → return, miss → synthesize + upsert)
//!       finder.rs:
//!           matcher.rs (host + template match)
//!     → Return: ResolvedRoute or RoutingError
//!
//! Route compilation (at startup / reload):
//!     RouteConfig[]
//!     → table.rs (runtime Routes, rate-limit index)
//!     → dynamic.rs pre-populates its cache with every (template, method)
//!     → Freeze as immutable RoutingEngine
//! ```
//!
//! # Design Decisions
//! - Strategies are an enum chosen by the selector, not looked up by name
//! - Cache reads and writes never block on I/O
//! - Deterministic: same input always yields the same key

pub mod cache;
pub mod creator;
pub mod dynamic;
pub mod engine;
pub mod error;
pub mod finder;
pub mod key;
pub mod matcher;
pub mod model;
pub mod path;
pub mod qos;
pub mod selector;
pub mod table;

pub use engine::RoutingEngine;
pub use error::{RoutingError, RoutingResult};
pub use model::{DownstreamTarget, ResolvedRoute, Route};
pub use selector::{ProviderSelector, ResolutionStrategy};
pub use table::RoutingConfig;

/// A way of resolving an upstream request to a downstream route.
pub trait RouteProvider: Send + Sync + std::fmt::Debug {
    fn get(
        &self,
        upstream_path: &str,
        upstream_query: &str,
        method: &str,
        config: &RoutingConfig,
        upstream_host: &str,
    ) -> RoutingResult<ResolvedRoute>;
}
