//! Application builder: wires configuration, store and services into `AppState`.

use std::sync::Arc;

use tracing::info;

use linkhub_auth::jwt::{JwtDecoder, JwtEncoder};
use linkhub_auth::password::PasswordHasher;
use linkhub_core::config::{AppConfig, DatabaseDriver};
use linkhub_core::error::AppError;
use linkhub_database::{MemoryStore, PgStore, Store};
use linkhub_service::auth::AuthService;
use linkhub_service::license::PlanLicense;
use linkhub_service::metric::metrics_sink;
use linkhub_service::workspace::resolve_signing_secret;

use crate::state::AppState;

/// Opens the store selected by `database.driver`, running migrations for
/// PostgreSQL.
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn Store>, AppError> {
    match config.database.driver {
        DatabaseDriver::Memory => {
            info!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        DatabaseDriver::Postgres => {
            let pool = linkhub_database::connection::connect(&config.database).await?;
            linkhub_database::migration::run_migrations(&pool).await?;
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

/// Builds the shared state. Must run inside a Tokio runtime.
pub async fn build_state(config: AppConfig, store: Arc<dyn Store>) -> Result<AppState, AppError> {
    let secret = resolve_signing_secret(store.as_ref(), &config.auth).await?;
    let hasher = PasswordHasher::new(&config.auth)?;
    let license = PlanLicense::from_config(&config.license);
    let metrics = metrics_sink(&config.metrics);

    let auth_service = AuthService::new(
        store,
        Arc::new(hasher),
        Arc::new(JwtEncoder::new(&secret)),
        Arc::new(JwtDecoder::new(&secret)),
        Arc::new(license),
        metrics,
    );

    info!("Application state initialized");
    Ok(AppState {
        config: Arc::new(config),
        auth_service: Arc::new(auth_service),
    })
}
