//! `workspace_settings` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_entity::workspace::{WorkspaceSetting, WorkspaceSettingKey, WorkspaceSettingValue};

use super::PgStore;
use crate::store::WorkspaceSettingStore;

#[derive(Debug, FromRow)]
struct SettingRow {
    value: serde_json::Value,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl WorkspaceSettingStore for PgStore {
    async fn get_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> AppResult<Option<WorkspaceSetting>> {
        let row = sqlx::query_as::<_, SettingRow>(
            "SELECT value, updated_at FROM workspace_settings WHERE key = $1",
        )
        .bind(key.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to get workspace setting", e)
        })?;

        row.map(|row| {
            Ok(WorkspaceSetting {
                value: WorkspaceSettingValue::from_payload(key, row.value)?,
                updated_at: row.updated_at,
            })
        })
        .transpose()
    }

    async fn upsert_workspace_setting(
        &self,
        setting: WorkspaceSetting,
    ) -> AppResult<WorkspaceSetting> {
        sqlx::query(
            "INSERT INTO workspace_settings (key, value, updated_at) VALUES ($1, $2, $3) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at",
        )
        .bind(setting.key().as_str())
        .bind(setting.value.to_payload()?)
        .bind(setting.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert workspace setting", e)
        })?;
        Ok(setting)
    }
}
