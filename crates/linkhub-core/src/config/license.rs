//! License plan configuration.

use serde::{Deserialize, Serialize};

/// License configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseConfig {
    /// Subscription plan: `"free"`, `"pro"`, or `"team"`.
    #[serde(default = "default_plan")]
    pub plan: String,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            plan: default_plan(),
        }
    }
}

fn default_plan() -> String {
    "free".to_string()
}
