//! Session token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::types::UserId;

use super::claims::Claims;
use super::secret::SigningSecret;
use super::{KEY_ID, TOKEN_AUDIENCE, TOKEN_ISSUER};

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// Whether the configured secret was empty.
    missing_secret: bool,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("missing_secret", &self.missing_secret)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates an encoder that signs with `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            missing_secret: secret.is_empty(),
        }
    }

    /// Issues a token for `user_id` that expires at `expires_at`.
    ///
    /// Every call carries a fresh `jti`, so two tokens for the same user
    /// and expiry still differ.
    pub fn issue(
        &self,
        email: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if self.missing_secret {
            return Err(AppError::signing("Token signing secret is empty"));
        }

        let claims = Claims {
            iss: TOKEN_ISSUER.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            sub: user_id.to_string(),
            name: email.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(KEY_ID.to_string());

        encode(&header, &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Signing, "Failed to sign session token", e)
        })
    }
}
