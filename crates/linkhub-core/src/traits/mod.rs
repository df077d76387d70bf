//! Collaborator traits defined in `linkhub-core` and implemented by other crates.

pub mod license;
pub mod metadata;
pub mod metrics;

pub use license::LicenseService;
pub use metadata::ResponseMetadata;
pub use metrics::MetricsSink;
