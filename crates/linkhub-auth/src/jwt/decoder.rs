//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use linkhub_core::error::AppError;

use super::claims::Claims;
use super::secret::SigningSecret;
use super::{TOKEN_AUDIENCE, TOKEN_ISSUER};

/// Clock skew tolerated when checking expiry, in seconds.
const LEEWAY_SECONDS: u64 = 5;

/// Validates session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Whether the configured secret was empty.
    missing_secret: bool,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder that verifies against `secret`.
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECONDS;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[TOKEN_AUDIENCE]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            missing_secret: secret.is_empty(),
        }
    }

    /// Decodes a token, checking signature, issuer, audience and expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        if self.missing_secret {
            return Err(AppError::unauthorized("Token validation is not configured"));
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer
                    | jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        AppError::unauthorized("Token was not issued for this service")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}
