//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

use linkhub_service::auth::{SignInRequest, SignUpRequest};

/// Sign-in request body.
#[derive(Clone, Deserialize, Validate)]
pub struct SignInBody {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<SignInBody> for SignInRequest {
    fn from(body: SignInBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

/// Sign-up request body.
#[derive(Clone, Deserialize, Validate)]
pub struct SignUpBody {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 64, message = "Nickname must be 1-64 characters"))]
    pub nickname: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<SignUpBody> for SignUpRequest {
    fn from(body: SignUpBody) -> Self {
        Self {
            email: body.email,
            nickname: body.nickname,
            password: body.password,
        }
    }
}
