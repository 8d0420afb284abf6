//! QoS options creation.

use crate::config::schema::QosConfig;
use crate::routing::model::QosOptions;

/// Produces the QoS policy for a downstream call site.
pub trait QosOptionsFactory: Send + Sync + std::fmt::Debug {
    fn create(&self, config: &QosConfig, path_template: &str, methods: &[String]) -> QosOptions;
}

/// Keys each circuit breaker by template and the methods it serves.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultQosOptionsFactory;

impl QosOptionsFactory for DefaultQosOptionsFactory {
    fn create(&self, config: &QosConfig, path_template: &str, methods: &[String]) -> QosOptions {
        QosOptions {
            key: format!("{}|{}", path_template, methods.join(",")),
            exceptions_allowed_before_breaking: config.exceptions_allowed_before_breaking,
            duration_of_break_ms: config.duration_of_break_ms,
            timeout_ms: config.timeout_ms,
        }
    }
}
