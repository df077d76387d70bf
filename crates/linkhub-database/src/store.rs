//! Store contracts consumed by the auth core.
//!
//! Implementations must be safe to share across concurrent requests.
//! Every method is a single logical operation; the auth core never
//! spans a transaction across calls.

use async_trait::async_trait;

use linkhub_core::result::AppResult;
use linkhub_core::types::UserId;
use linkhub_entity::access_token::AccessToken;
use linkhub_entity::user::{CreateUser, FindUser, User};
use linkhub_entity::workspace::{WorkspaceSetting, WorkspaceSettingKey};

/// User account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Return the first user matching `find`, preferring non-archived rows.
    async fn find_user(&self, find: &FindUser) -> AppResult<Option<User>>;

    /// Return every user matching `find`.
    async fn list_users(&self, find: &FindUser) -> AppResult<Vec<User>>;

    /// Count users matching `find`.
    async fn count_users(&self, find: &FindUser) -> AppResult<u64> {
        Ok(self.list_users(find).await?.len() as u64)
    }

    /// Insert a new user and return the stored record.
    ///
    /// An `Admin` role is granted only if the store holds no users at the
    /// moment of insertion, checked atomically with the insert; otherwise
    /// the user is stored as `User`. Fails with a `Conflict` error when a
    /// non-archived user already holds the email.
    async fn create_user(&self, create: CreateUser) -> AppResult<User>;
}

/// Deployment-wide settings persistence.
#[async_trait]
pub trait WorkspaceSettingStore: Send + Sync + 'static {
    /// Fetch a setting, or `None` if it was never written.
    async fn get_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> AppResult<Option<WorkspaceSetting>>;

    /// Insert or replace a setting.
    async fn upsert_workspace_setting(
        &self,
        setting: WorkspaceSetting,
    ) -> AppResult<WorkspaceSetting>;
}

/// Registry of issued session tokens.
#[async_trait]
pub trait AccessTokenStore: Send + Sync + 'static {
    /// Record a token for `user_id`, replacing any entry with the same token string.
    async fn upsert_access_token(&self, user_id: UserId, token: AccessToken) -> AppResult<()>;

    /// List the tokens recorded for `user_id`, newest first.
    async fn list_access_tokens(&self, user_id: UserId) -> AppResult<Vec<AccessToken>>;
}

/// Everything the auth core needs from persistence.
pub trait Store: UserStore + WorkspaceSettingStore + AccessTokenStore + std::fmt::Debug {}

impl<T> Store for T where T: UserStore + WorkspaceSettingStore + AccessTokenStore + std::fmt::Debug {}
