//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use linkhub_core::config::AppConfig;
use linkhub_service::auth::AuthService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Sign-in, sign-up and sign-out
    pub auth_service: Arc<AuthService>,
}
