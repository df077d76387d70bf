//! Auth handlers: sign-in, sign-up, sign-out, status.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use validator::Validate;

use linkhub_auth::jwt::ACCESS_TOKEN_COOKIE_NAME;
use linkhub_core::error::AppError;
use linkhub_core::traits::ResponseMetadata;
use linkhub_service::auth::AuthResult;

use crate::cookie::SessionCookieWriter;
use crate::dto::request::{SignInBody, SignUpBody};
use crate::dto::response::{ApiResponse, AuthResponse, EmptyResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{RequestCtx, SessionToken};
use crate::state::AppState;

/// Validates a request body, reporting every failing field.
fn validate(body: &impl Validate) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// Sets the session cookie for a freshly issued token.
fn session_cookie(state: &AppState, result: &AuthResult) -> Result<HeaderMap, AppError> {
    let max_age = (result.expires_at - Utc::now()).num_seconds();
    let mut cookies = SessionCookieWriter::new(state.config.server.secure_cookies, max_age);
    cookies.set_header(ACCESS_TOKEN_COOKIE_NAME, &result.access_token)?;
    Ok(cookies.into_headers())
}

/// POST /api/v2/auth/signin
pub async fn sign_in(
    State(state): State<AppState>,
    ctx: RequestCtx,
    Json(body): Json<SignInBody>,
) -> Result<(HeaderMap, Json<ApiResponse<AuthResponse>>), ApiError> {
    validate(&body)?;

    let result = state.auth_service.sign_in(&ctx, body.into()).await?;
    let headers = session_cookie(&state, &result)?;

    Ok((headers, Json(ApiResponse::ok(result.into()))))
}

/// POST /api/v2/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    ctx: RequestCtx,
    Json(body): Json<SignUpBody>,
) -> Result<(HeaderMap, Json<ApiResponse<AuthResponse>>), ApiError> {
    validate(&body)?;

    let result = state.auth_service.sign_up(&ctx, body.into()).await?;
    let headers = session_cookie(&state, &result)?;

    Ok((headers, Json(ApiResponse::ok(result.into()))))
}

/// POST /api/v2/auth/signout
pub async fn sign_out(
    State(state): State<AppState>,
) -> Result<(HeaderMap, Json<ApiResponse<EmptyResponse>>), ApiError> {
    let mut cookies = SessionCookieWriter::new(state.config.server.secure_cookies, 0);
    state.auth_service.sign_out(&mut cookies)?;

    Ok((
        cookies.into_headers(),
        Json(ApiResponse::ok(EmptyResponse::default())),
    ))
}

/// GET /api/v2/auth/status
pub async fn status(
    State(state): State<AppState>,
    ctx: RequestCtx,
    token: SessionToken,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service.auth_status(&ctx, token.as_deref()).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
