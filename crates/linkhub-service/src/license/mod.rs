//! License feature resolution.

pub mod plan;

pub use plan::PlanLicense;
