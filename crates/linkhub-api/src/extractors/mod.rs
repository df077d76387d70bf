//! Custom Axum extractors.

pub mod auth;
pub mod context;

pub use auth::SessionToken;
pub use context::RequestCtx;
