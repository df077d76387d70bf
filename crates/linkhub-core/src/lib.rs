//! # linkhub-core
//!
//! Core crate for LinkHub. Contains the unified error system, configuration
//! schemas, typed identifiers, license feature types, and the collaborator
//! traits (license, metrics, response metadata) consumed by the auth core.
//!
//! This crate has **no** internal dependencies on other LinkHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
