//! `RequestCtx` extractor: a [`RequestContext`] bounded by the configured timeout.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use linkhub_service::context::RequestContext;

use crate::middleware::logging::REQUEST_ID_HEADER;
use crate::state::AppState;

/// Request context available in handlers.
#[derive(Debug, Clone)]
pub struct RequestCtx(pub RequestContext);

impl std::ops::Deref for RequestCtx {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for RequestCtx {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
        let mut ctx = RequestContext::with_timeout(timeout);

        if let Some(request_id) = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<Uuid>().ok())
        {
            ctx = ctx.with_request_id(request_id);
        }

        Ok(Self(ctx))
    }
}
