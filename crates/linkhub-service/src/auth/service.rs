//! Authentication orchestration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use linkhub_auth::jwt::{ACCESS_TOKEN_COOKIE_NAME, ACCESS_TOKEN_DURATION, JwtDecoder, JwtEncoder};
use linkhub_auth::password::PasswordHasher;
use linkhub_auth::policy::{check_account_quota, check_signup_enabled, role_for_new_account};
use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::traits::{LicenseService, MetricsSink, ResponseMetadata};
use linkhub_core::types::FeatureType;
use linkhub_database::Store;
use linkhub_entity::access_token::{AccessToken, USER_LOGIN_DESCRIPTION};
use linkhub_entity::user::{CreateUser, FindUser, User};
use linkhub_entity::workspace::{WorkspaceSetting, WorkspaceSettingKey};

use crate::context::RequestContext;

/// Shown for both an unknown email and a wrong password.
const UNMATCHED_CREDENTIALS: &str = "unmatched email and password";

const SIGN_IN_EVENT: &str = "user sign in";
const SIGN_UP_EVENT: &str = "user sign up";

/// Credentials for signing in.
#[derive(Clone)]
pub struct SignInRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Details for creating an account.
#[derive(Clone)]
pub struct SignUpRequest {
    /// Login email.
    pub email: String,
    /// Display name.
    pub nickname: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("nickname", &self.nickname)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// A signed-in user and the session token issued for them.
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// The account.
    pub user: User,
    /// Signed session token.
    pub access_token: String,
    /// When `access_token` stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Wrap a collaborator failure as an `Internal` error named after the
/// operation. Cancellation passes through unchanged.
fn internal(operation: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| {
        if err.is_cancelled() {
            err
        } else {
            AppError::with_source(ErrorKind::Internal, operation, err)
        }
    }
}

/// Orchestrates sign-in, sign-up and sign-out.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Persistence.
    store: Arc<dyn Store>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session token issuer.
    encoder: Arc<JwtEncoder>,
    /// Session token validator.
    decoder: Arc<JwtDecoder>,
    /// License feature checks.
    license: Arc<dyn LicenseService>,
    /// Usage metrics.
    metrics: Arc<dyn MetricsSink>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        store: Arc<dyn Store>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        license: Arc<dyn LicenseService>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            store,
            hasher,
            encoder,
            decoder,
            license,
            metrics,
        }
    }

    /// Authenticates an existing account and issues a session token.
    pub async fn sign_in(&self, ctx: &RequestContext, req: SignInRequest) -> AppResult<AuthResult> {
        let find = FindUser::by_email(req.email.as_str());
        let user = ctx
            .guard(self.store.find_user(&find))
            .await
            .map_err(internal("failed to find user by email"))?
            .ok_or_else(|| AppError::unauthorized(UNMATCHED_CREDENTIALS))?;

        if user.is_archived() {
            return Err(AppError::forbidden("user has been archived"));
        }

        if !self
            .verify_password(ctx, req.password, user.password_hash.clone())
            .await?
        {
            return Err(AppError::unauthorized(UNMATCHED_CREDENTIALS));
        }

        let result = self.issue_session(ctx, user).await?;
        self.metrics.enqueue(SIGN_IN_EVENT);

        info!(
            request_id = %ctx.request_id,
            user_id = %result.user.id,
            "User signed in"
        );
        Ok(result)
    }

    /// Creates an account, subject to the workspace policy and license,
    /// and issues a session token for it.
    ///
    /// The first account becomes the admin. The store re-checks emptiness
    /// atomically on insert, so concurrent first signups yield one admin.
    pub async fn sign_up(&self, ctx: &RequestContext, req: SignUpRequest) -> AppResult<AuthResult> {
        let setting = ctx
            .guard(
                self.store
                    .get_workspace_setting(WorkspaceSettingKey::EnableSignup),
            )
            .await
            .map_err(internal("failed to get workspace setting"))?;
        check_signup_enabled(setting.as_ref().and_then(WorkspaceSetting::enable_signup))
            .into_result()?;

        if !self
            .license
            .is_feature_enabled(FeatureType::UnlimitedAccounts)
        {
            let count = self.count_users(ctx).await?;
            check_account_quota(count, false).into_result()?;
        }

        let password_hash = self.hash_password(ctx, req.password).await?;

        let count = self.count_users(ctx).await?;
        let role = role_for_new_account(count);

        let create = CreateUser {
            email: req.email,
            nickname: req.nickname,
            password_hash,
            role,
        };
        let user = ctx
            .guard(self.store.create_user(create))
            .await
            .map_err(internal("failed to create user"))?;

        info!(
            request_id = %ctx.request_id,
            user_id = %user.id,
            role = %user.role,
            "User signed up"
        );

        let result = self.issue_session(ctx, user).await?;
        self.metrics.enqueue(SIGN_UP_EVENT);
        Ok(result)
    }

    /// Clears the session cookie on the outgoing response.
    ///
    /// Issued tokens stay valid until they expire.
    pub fn sign_out(&self, metadata: &mut dyn ResponseMetadata) -> AppResult<()> {
        metadata
            .set_header(ACCESS_TOKEN_COOKIE_NAME, "")
            .map_err(internal("failed to clear session cookie"))
    }

    /// Resolves the account a session token belongs to.
    pub async fn auth_status(&self, ctx: &RequestContext, token: Option<&str>) -> AppResult<User> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("missing access token"))?;
        let claims = self.decoder.decode(token)?;
        let user_id = claims.user_id()?;

        let user = ctx
            .guard(self.store.find_user(&FindUser::by_id(user_id)))
            .await
            .map_err(internal("failed to find user"))?
            .ok_or_else(|| AppError::unauthorized("user not found"))?;

        if user.is_archived() {
            return Err(AppError::forbidden("user has been archived"));
        }
        Ok(user)
    }

    async fn count_users(&self, ctx: &RequestContext) -> AppResult<u64> {
        ctx.guard(self.store.count_users(&FindUser::default()))
            .await
            .map_err(internal("failed to count users"))
    }

    async fn hash_password(&self, ctx: &RequestContext, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        ctx.guard(async move {
            tokio::task::spawn_blocking(move || hasher.hash_password(&password))
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Internal, "password hashing task failed", e)
                })?
        })
        .await
        .map_err(internal("failed to hash password"))
    }

    /// `Ok(false)` for a mismatch or an unreadable stored hash.
    async fn verify_password(
        &self,
        ctx: &RequestContext,
        password: String,
        hash: String,
    ) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let verified = ctx
            .guard(async move {
                tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
                    .await
                    .map_err(|e| {
                        AppError::with_source(
                            ErrorKind::Internal,
                            "password verification task failed",
                            e,
                        )
                    })
            })
            .await
            .map_err(internal("failed to verify password"))?;

        match verified {
            Ok(matched) => Ok(matched),
            Err(err) => {
                warn!(
                    request_id = %ctx.request_id,
                    error = %err,
                    "Stored password hash could not be read"
                );
                Ok(false)
            }
        }
    }

    async fn issue_session(&self, ctx: &RequestContext, user: User) -> AppResult<AuthResult> {
        let issued_at = Utc::now();
        let expires_at = issued_at + ACCESS_TOKEN_DURATION;

        let access_token = self
            .encoder
            .issue(&user.email, user.id, expires_at)
            .map_err(internal("failed to generate access token"))?;

        let record = AccessToken::new(
            user.id,
            access_token.clone(),
            USER_LOGIN_DESCRIPTION,
            issued_at,
            expires_at,
        );
        ctx.guard(self.store.upsert_access_token(user.id, record))
            .await
            .map_err(internal("failed to upsert access token to store"))?;

        Ok(AuthResult {
            user,
            access_token,
            expires_at,
        })
    }
}
