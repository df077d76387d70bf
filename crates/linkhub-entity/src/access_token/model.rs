//! Access-token audit record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use linkhub_core::types::{AccessTokenId, UserId};

/// Description attached to tokens issued by sign-in and sign-up.
pub const USER_LOGIN_DESCRIPTION: &str = "user login";

/// Registry entry binding an issued session token to its holder.
///
/// This is not the credential itself; tokens are validated statelessly.
/// The record exists so tokens can be listed and revoked by tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Record identifier.
    pub id: AccessTokenId,
    /// The user holding the token.
    pub user_id: UserId,
    /// The signed token string.
    #[serde(skip_serializing)]
    pub token: String,
    /// Why the token was issued.
    pub description: String,
    /// Issuance time.
    pub issued_at: DateTime<Utc>,
    /// Expiry embedded in the token.
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a record for a freshly issued token.
    pub fn new(
        user_id: UserId,
        token: impl Into<String>,
        description: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccessTokenId::new(),
            user_id,
            token: token.into(),
            description: description.into(),
            issued_at,
            expires_at,
        }
    }

    /// Whether the token's embedded expiry has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
