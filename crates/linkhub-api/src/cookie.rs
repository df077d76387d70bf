//! Session cookie encoding.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum_extra::extract::cookie::{Cookie, SameSite};
use cookie::time::Duration;

use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::traits::ResponseMetadata;

/// Writes credentials as `Set-Cookie` headers.
///
/// An empty value expires the cookie immediately.
#[derive(Debug, Clone)]
pub struct SessionCookieWriter {
    headers: HeaderMap,
    secure: bool,
    max_age_seconds: i64,
}

impl SessionCookieWriter {
    /// Creates a writer whose cookies live for `max_age_seconds`.
    pub fn new(secure: bool, max_age_seconds: i64) -> Self {
        Self {
            headers: HeaderMap::new(),
            secure,
            max_age_seconds: max_age_seconds.max(0),
        }
    }

    /// The collected response headers.
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    fn render(&self, name: &str, value: &str) -> String {
        let max_age = if value.is_empty() {
            0
        } else {
            self.max_age_seconds
        };

        Cookie::build((name.to_string(), value.to_string()))
            .path("/")
            .max_age(Duration::seconds(max_age))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure)
            .to_string()
    }
}

impl ResponseMetadata for SessionCookieWriter {
    fn set_header(&mut self, name: &str, value: &str) -> AppResult<()> {
        let cookie = self.render(name, value);
        let header = HeaderValue::from_str(&cookie).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Invalid cookie value", e)
        })?;
        self.headers.append(SET_COOKIE, header);
        Ok(())
    }
}
