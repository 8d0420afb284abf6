//! Downstream route resolution for an API gateway.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use lifecycle::Shutdown;
pub use routing::{ResolvedRoute, RoutingEngine, RoutingError};
