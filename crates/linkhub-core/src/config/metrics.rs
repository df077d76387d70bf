//! Metrics queue configuration.

use serde::{Deserialize, Serialize};

/// Usage metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether usage events are recorded at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Capacity of the in-process event queue; events beyond it are dropped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_queue_capacity() -> usize {
    1024
}
