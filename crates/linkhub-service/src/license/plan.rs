//! Feature flags derived from the configured subscription plan.

use tracing::{info, warn};

use linkhub_core::config::LicenseConfig;
use linkhub_core::traits::LicenseService;
use linkhub_core::types::{FeatureType, PlanType};

/// License service backed by a fixed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLicense {
    plan: PlanType,
}

impl PlanLicense {
    /// Creates a license for `plan`.
    pub fn new(plan: PlanType) -> Self {
        Self { plan }
    }

    /// Resolves the plan named in configuration.
    ///
    /// An unrecognized plan name falls back to the free plan.
    pub fn from_config(config: &LicenseConfig) -> Self {
        let plan = match config.plan.parse::<PlanType>() {
            Ok(plan) => plan,
            Err(e) => {
                warn!(plan = %config.plan, error = %e, "Unknown license plan, using free plan");
                PlanType::Free
            }
        };
        info!(plan = %plan, "License plan resolved");
        Self::new(plan)
    }

    /// The active plan.
    pub fn plan(&self) -> PlanType {
        self.plan
    }
}

impl LicenseService for PlanLicense {
    fn is_feature_enabled(&self, feature: FeatureType) -> bool {
        self.plan.features().contains(&feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license(plan: &str) -> PlanLicense {
        PlanLicense::from_config(&LicenseConfig {
            plan: plan.to_string(),
        })
    }

    #[test]
    fn test_free_plan_has_no_features() {
        assert!(!license("free").is_feature_enabled(FeatureType::UnlimitedAccounts));
    }

    #[test]
    fn test_paid_plans_unlock_unlimited_accounts() {
        assert!(license("pro").is_feature_enabled(FeatureType::UnlimitedAccounts));
        assert!(license(" Team ").is_feature_enabled(FeatureType::UnlimitedAccounts));
    }

    #[test]
    fn test_unknown_plan_falls_back_to_free() {
        let license = license("enterprise-plus");
        assert_eq!(license.plan(), PlanType::Free);
        assert!(!license.is_feature_enabled(FeatureType::UnlimitedAccounts));
    }
}
