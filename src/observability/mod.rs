//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (cache hit/miss counters, cache size gauge)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
