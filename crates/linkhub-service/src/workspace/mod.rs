//! Deployment-wide workspace bootstrap.

pub mod secret;

pub use secret::resolve_signing_secret;
