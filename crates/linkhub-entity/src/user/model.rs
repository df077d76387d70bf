//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkhub_core::types::UserId;

use super::role::UserRole;
use crate::common::RowStatus;

/// A registered account of the link service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login email, unique among non-archived users.
    pub email: String,
    /// Human-readable display name.
    pub nickname: String,
    /// Argon2 PHC hash of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Workspace role.
    pub role: UserRole,
    /// Lifecycle status.
    pub row_status: RowStatus,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account has been archived.
    pub fn is_archived(&self) -> bool {
        self.row_status.is_archived()
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Compares emails the way the `users` email index does (`LOWER(email)`),
/// folding Unicode case.
pub fn emails_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Display name.
    pub nickname: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Criteria for user lookups. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct FindUser {
    /// Match by id.
    pub id: Option<UserId>,
    /// Match by email (case-insensitive).
    pub email: Option<String>,
    /// Match by row status.
    pub row_status: Option<RowStatus>,
}

impl FindUser {
    /// Criteria matching a single email.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Criteria matching a single id.
    pub fn by_id(id: UserId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Whether `user` satisfies every set criterion.
    pub fn matches(&self, user: &User) -> bool {
        self.id.is_none_or(|id| id == user.id)
            && self
                .email
                .as_deref()
                .is_none_or(|email| emails_match(email, &user.email))
            && self.row_status.is_none_or(|status| status == user.row_status)
    }
}
