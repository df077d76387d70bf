//! Core type definitions used across the LinkHub workspace.

pub mod id;
pub mod license;

pub use id::*;
pub use license::{FeatureType, PlanType};
