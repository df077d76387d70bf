//! Session token issuance and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod secret;

use chrono::Duration;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
pub use secret::SigningSecret;

/// Lifetime of every session token, counted from issuance.
pub const ACCESS_TOKEN_DURATION: Duration = Duration::days(7);

/// Name of the cookie that carries the session token.
pub const ACCESS_TOKEN_COOKIE_NAME: &str = "linkhub.access-token";

/// `iss` claim of every session token.
pub const TOKEN_ISSUER: &str = "linkhub";

/// `aud` claim of every session token.
pub const TOKEN_AUDIENCE: &str = "user.access-token";

/// `kid` header of every session token.
pub const KEY_ID: &str = "v1";
