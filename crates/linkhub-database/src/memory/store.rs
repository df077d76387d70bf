//! In-memory [`Store`](crate::store::Store) implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::types::UserId;
use linkhub_entity::access_token::AccessToken;
use linkhub_entity::common::RowStatus;
use linkhub_entity::user::{CreateUser, FindUser, User, UserRole, emails_match};
use linkhub_entity::workspace::{WorkspaceSetting, WorkspaceSettingKey};

use crate::store::{AccessTokenStore, UserStore, WorkspaceSettingStore};

#[derive(Debug, Default)]
struct Tables {
    /// Insertion order doubles as creation order.
    users: Vec<User>,
    settings: HashMap<WorkspaceSettingKey, WorkspaceSetting>,
    /// Keyed by token string.
    access_tokens: HashMap<String, AccessToken>,
}

/// Store backed by process memory. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user archived. Returns `false` if no such user exists.
    pub async fn archive_user(&self, id: UserId) -> bool {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.row_status = RowStatus::Archived;
                user.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, find: &FindUser) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        let found = tables
            .users
            .iter()
            .find(|u| find.matches(u) && !u.is_archived())
            .or_else(|| tables.users.iter().find(|u| find.matches(u)));
        Ok(found.cloned())
    }

    async fn list_users(&self, find: &FindUser) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| find.matches(u))
            .cloned()
            .collect())
    }

    async fn count_users(&self, find: &FindUser) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().filter(|u| find.matches(u)).count() as u64)
    }

    async fn create_user(&self, create: CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .iter()
            .any(|u| !u.is_archived() && emails_match(&u.email, &create.email));
        if taken {
            return Err(AppError::conflict(format!(
                "User with email '{}' already exists",
                create.email
            )));
        }

        let role = if create.role.is_admin() && !tables.users.is_empty() {
            UserRole::User
        } else {
            create.role
        };

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: create.email,
            nickname: create.nickname,
            password_hash: create.password_hash,
            role,
            row_status: RowStatus::Normal,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());

        debug!(user_id = %user.id, "Stored user in memory");
        Ok(user)
    }
}

#[async_trait]
impl WorkspaceSettingStore for MemoryStore {
    async fn get_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> AppResult<Option<WorkspaceSetting>> {
        Ok(self.tables.read().await.settings.get(&key).cloned())
    }

    async fn upsert_workspace_setting(
        &self,
        setting: WorkspaceSetting,
    ) -> AppResult<WorkspaceSetting> {
        let mut tables = self.tables.write().await;
        tables.settings.insert(setting.key(), setting.clone());
        Ok(setting)
    }
}

#[async_trait]
impl AccessTokenStore for MemoryStore {
    async fn upsert_access_token(&self, user_id: UserId, mut token: AccessToken) -> AppResult<()> {
        token.user_id = user_id;
        let mut tables = self.tables.write().await;
        tables.access_tokens.insert(token.token.clone(), token);
        Ok(())
    }

    async fn list_access_tokens(&self, user_id: UserId) -> AppResult<Vec<AccessToken>> {
        let tables = self.tables.read().await;
        let mut tokens: Vec<AccessToken> = tables
            .access_tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tokens.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(tokens)
    }
}
