//! Token signing secret resolution.

use tracing::info;
use uuid::Uuid;

use linkhub_auth::jwt::SigningSecret;
use linkhub_core::config::AuthConfig;
use linkhub_core::result::AppResult;
use linkhub_database::Store;
use linkhub_entity::workspace::{WorkspaceSetting, WorkspaceSettingKey, WorkspaceSettingValue};

/// Determines the process signing secret at startup.
///
/// Order: the configured `auth.secret`, then the stored `SECRET_SESSION`
/// setting, then a freshly generated secret which is stored so that
/// restarts keep issued tokens valid.
pub async fn resolve_signing_secret(
    store: &dyn Store,
    config: &AuthConfig,
) -> AppResult<SigningSecret> {
    if !config.secret.is_empty() {
        info!("Using configured token signing secret");
        return Ok(SigningSecret::new(config.secret.clone()));
    }

    let stored = store
        .get_workspace_setting(WorkspaceSettingKey::SecretSession)
        .await?;
    if let Some(secret) = stored
        .as_ref()
        .and_then(WorkspaceSetting::secret_session)
        .filter(|s| !s.is_empty())
    {
        info!("Using stored token signing secret");
        return Ok(SigningSecret::new(secret));
    }

    let secret = Uuid::new_v4().to_string();
    store
        .upsert_workspace_setting(WorkspaceSetting::new(WorkspaceSettingValue::SecretSession(
            secret.clone(),
        )))
        .await?;

    info!("Generated and stored a new token signing secret");
    Ok(SigningSecret::new(secret))
}
