//! Usage metrics collection.

pub mod collector;

use std::sync::Arc;

use linkhub_core::config::MetricsConfig;
use linkhub_core::traits::MetricsSink;
use linkhub_core::traits::metrics::NoopMetrics;

pub use collector::MetricCollector;

/// Builds the sink selected by configuration. Must run inside a Tokio runtime.
pub fn metrics_sink(config: &MetricsConfig) -> Arc<dyn MetricsSink> {
    if config.enabled {
        Arc::new(MetricCollector::spawn(config.queue_capacity))
    } else {
        Arc::new(NoopMetrics)
    }
}
