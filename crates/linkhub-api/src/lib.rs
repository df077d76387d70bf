//! # linkhub-api
//!
//! HTTP API layer for LinkHub built on Axum.
//!
//! Translates the auth service operations into JSON endpoints, maps
//! [`AppError`](linkhub_core::AppError) kinds to status codes, and writes
//! the session cookie.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, connect_store};
pub use router::build_router;
pub use state::AppState;
