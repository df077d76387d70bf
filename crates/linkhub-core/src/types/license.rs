//! License plans and the paid capabilities they unlock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A paid capability gated by the active license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    /// No cap on the number of accounts in the workspace.
    UnlimitedAccounts,
}

impl FeatureType {
    /// Return the canonical feature key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnlimitedAccounts => "UNLIMITED_ACCOUNTS",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subscription tier of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Self-hosted free tier.
    #[default]
    Free,
    /// Paid individual tier.
    Pro,
    /// Paid team tier.
    Team,
}

impl PlanType {
    /// Features included in this plan.
    pub fn features(&self) -> &'static [FeatureType] {
        match self {
            Self::Free => &[],
            Self::Pro | Self::Team => &[FeatureType::UnlimitedAccounts],
        }
    }

    /// Return the plan as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Team => "team",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "team" => Ok(Self::Team),
            _ => Err(AppError::configuration(format!(
                "Invalid license plan: '{s}'. Expected one of: free, pro, team"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_plan_has_no_features() {
        assert!(PlanType::Free.features().is_empty());
    }

    #[test]
    fn test_paid_plans_unlock_unlimited_accounts() {
        assert!(PlanType::Pro.features().contains(&FeatureType::UnlimitedAccounts));
        assert!(PlanType::Team.features().contains(&FeatureType::UnlimitedAccounts));
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!(" PRO ".parse::<PlanType>().unwrap(), PlanType::Pro);
        assert!("enterprise".parse::<PlanType>().is_err());
    }
}
