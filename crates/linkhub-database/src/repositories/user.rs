//! `users` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::types::UserId;
use linkhub_entity::common::RowStatus;
use linkhub_entity::user::{CreateUser, FindUser, User, UserRole};

use super::{PgStore, is_unique_violation};
use crate::store::UserStore;

const USER_COLUMNS: &str =
    "id, email, nickname, password_hash, role, row_status, created_at, updated_at";

/// Raw row; enums are stored as their canonical strings.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    nickname: String,
    password_hash: String,
    role: String,
    row_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: UserRole = row.role.parse().map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Stored user has an invalid role", e)
        })?;
        let row_status: RowStatus = row.row_status.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Stored user has an invalid row status",
                e,
            )
        })?;
        Ok(User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            nickname: row.nickname,
            password_hash: row.password_hash,
            role,
            row_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Append `WHERE` clauses for every set criterion.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, find: &FindUser) {
    builder.push(" WHERE TRUE");
    if let Some(id) = find.id {
        builder.push(" AND id = ").push_bind(id.into_uuid());
    }
    if let Some(email) = &find.email {
        builder
            .push(" AND LOWER(email) = LOWER(")
            .push_bind(email.clone())
            .push(")");
    }
    if let Some(status) = find.row_status {
        builder.push(" AND row_status = ").push_bind(status.as_str());
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, find: &FindUser) -> AppResult<Option<User>> {
        let mut builder = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filters(&mut builder, find);
        builder.push(" ORDER BY (row_status = 'NORMAL') DESC, created_at DESC LIMIT 1");

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))?;
        row.map(User::try_from).transpose()
    }

    async fn list_users(&self, find: &FindUser) -> AppResult<Vec<User>> {
        let mut builder = QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users"));
        push_filters(&mut builder, find);
        builder.push(" ORDER BY created_at ASC");

        builder
            .build_query_as::<UserRow>()
            .fetch_all(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn count_users(&self, find: &FindUser) -> AppResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_filters(&mut builder, find);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(total.max(0) as u64)
    }

    async fn create_user(&self, create: CreateUser) -> AppResult<User> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to create user", e);

        let mut tx = self.pool().begin().await.map_err(db_err)?;

        // Concurrent first signups must not both end up as admin.
        if create.role.is_admin() {
            sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, email, nickname, password_hash, role, row_status) \
             VALUES ($1, $2, $3, $4, \
                CASE WHEN $5 = 'ADMIN' AND EXISTS (SELECT 1 FROM users) THEN 'USER' ELSE $5 END, \
                'NORMAL') \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&create.email)
        .bind(&create.nickname)
        .bind(&create.password_hash)
        .bind(create.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("User with email '{}' already exists", create.email),
                    e,
                )
            } else {
                db_err(e)
            }
        })?;

        tx.commit().await.map_err(db_err)?;

        let user = User::try_from(row)?;
        debug!(user_id = %user.id, role = %user.role, "Inserted user");
        Ok(user)
    }
}
