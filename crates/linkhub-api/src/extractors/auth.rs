//! `SessionToken` extractor: the session token from the `Authorization`
//! header or, failing that, the session cookie.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use linkhub_auth::jwt::ACCESS_TOKEN_COOKIE_NAME;

/// The caller's session token, if one was presented.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    /// The token as a string slice.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from);
        if bearer.is_some() {
            return Ok(Self(bearer));
        }

        let jar = CookieJar::from_request_parts(parts, state).await?;
        Ok(Self(
            jar.get(ACCESS_TOKEN_COOKIE_NAME)
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty()),
        ))
    }
}
