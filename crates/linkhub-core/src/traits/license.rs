//! License capability check consulted by account provisioning.

use crate::types::FeatureType;

/// Answers whether a paid capability is available to this deployment.
///
/// There is no error path: an implementation that cannot
/// reach its license source must answer `false`.
pub trait LicenseService: Send + Sync + std::fmt::Debug + 'static {
    /// Returns `true` if `feature` is licensed.
    fn is_feature_enabled(&self, feature: FeatureType) -> bool;
}
