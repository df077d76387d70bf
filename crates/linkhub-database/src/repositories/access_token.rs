//! `access_tokens` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::types::{AccessTokenId, UserId};
use linkhub_entity::access_token::AccessToken;

use super::PgStore;
use crate::store::AccessTokenStore;

#[derive(Debug, FromRow)]
struct AccessTokenRow {
    id: Uuid,
    user_id: Uuid,
    token: String,
    description: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<AccessTokenRow> for AccessToken {
    fn from(row: AccessTokenRow) -> Self {
        Self {
            id: AccessTokenId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            token: row.token,
            description: row.description,
            issued_at: row.issued_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl AccessTokenStore for PgStore {
    async fn upsert_access_token(&self, user_id: UserId, token: AccessToken) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO access_tokens (id, user_id, token, description, issued_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (token) DO UPDATE SET \
                user_id = EXCLUDED.user_id, \
                description = EXCLUDED.description, \
                issued_at = EXCLUDED.issued_at, \
                expires_at = EXCLUDED.expires_at",
        )
        .bind(token.id.into_uuid())
        .bind(user_id.into_uuid())
        .bind(&token.token)
        .bind(&token.description)
        .bind(token.issued_at)
        .bind(token.expires_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record access token", e)
        })?;
        Ok(())
    }

    async fn list_access_tokens(&self, user_id: UserId) -> AppResult<Vec<AccessToken>> {
        let rows = sqlx::query_as::<_, AccessTokenRow>(
            "SELECT id, user_id, token, description, issued_at, expires_at \
             FROM access_tokens WHERE user_id = $1 ORDER BY issued_at DESC",
        )
        .bind(user_id.into_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list access tokens", e)
        })?;
        Ok(rows.into_iter().map(AccessToken::from).collect())
    }
}
