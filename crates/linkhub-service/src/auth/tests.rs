use std::sync::{Arc, Mutex};

use chrono::Utc;

use linkhub_auth::jwt::{ACCESS_TOKEN_DURATION, JwtDecoder, JwtEncoder, SigningSecret};
use linkhub_auth::password::PasswordHasher;
use linkhub_core::config::AuthConfig;
use linkhub_core::error::{AppError, ErrorKind};
use linkhub_core::result::AppResult;
use linkhub_core::traits::{LicenseService, MetricsSink, ResponseMetadata};
use linkhub_core::types::{FeatureType, UserId};
use linkhub_database::{AccessTokenStore, MemoryStore, Store, UserStore, WorkspaceSettingStore};
use linkhub_entity::access_token::{AccessToken, USER_LOGIN_DESCRIPTION};
use linkhub_entity::user::{CreateUser, FindUser, User, UserRole};
use linkhub_entity::workspace::{WorkspaceSetting, WorkspaceSettingKey, WorkspaceSettingValue};

use super::{AuthService, SignInRequest, SignUpRequest};
use crate::context::RequestContext;

#[derive(Debug)]
struct FixedLicense(bool);

impl LicenseService for FixedLicense {
    fn is_feature_enabled(&self, feature: FeatureType) -> bool {
        feature == FeatureType::UnlimitedAccounts && self.0
    }
}

#[derive(Debug, Default)]
struct RecordingMetrics(Mutex<Vec<&'static str>>);

impl RecordingMetrics {
    fn events(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

impl MetricsSink for RecordingMetrics {
    fn enqueue(&self, event: &'static str) {
        self.0.lock().unwrap().push(event);
    }
}

#[derive(Default)]
struct RecordingMetadata(Vec<(String, String)>);

impl ResponseMetadata for RecordingMetadata {
    fn set_header(&mut self, name: &str, value: &str) -> AppResult<()> {
        self.0.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

struct ClosedMetadata;

impl ResponseMetadata for ClosedMetadata {
    fn set_header(&mut self, _name: &str, _value: &str) -> AppResult<()> {
        Err(AppError::internal("response already sent"))
    }
}

struct Harness {
    store: MemoryStore,
    metrics: Arc<RecordingMetrics>,
    decoder: JwtDecoder,
    service: AuthService,
}

fn build_service(
    store: Arc<dyn Store>,
    secret: &SigningSecret,
    unlimited_accounts: bool,
    metrics: Arc<RecordingMetrics>,
) -> AuthService {
    let hasher = PasswordHasher::new(&AuthConfig {
        hash_memory_kib: 8,
        hash_iterations: 1,
        hash_parallelism: 1,
        ..AuthConfig::default()
    })
    .unwrap();

    AuthService::new(
        store,
        Arc::new(hasher),
        Arc::new(JwtEncoder::new(secret)),
        Arc::new(JwtDecoder::new(secret)),
        Arc::new(FixedLicense(unlimited_accounts)),
        metrics,
    )
}

fn harness(unlimited_accounts: bool) -> Harness {
    let store = MemoryStore::new();
    let secret = SigningSecret::new("service-test-secret");
    let metrics = Arc::new(RecordingMetrics::default());
    let service = build_service(
        Arc::new(store.clone()),
        &secret,
        unlimited_accounts,
        metrics.clone(),
    );

    Harness {
        store,
        metrics,
        decoder: JwtDecoder::new(&secret),
        service,
    }
}

const DRIVER_ERROR: &str = "connection reset by peer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailOn {
    FindUser,
    GetWorkspaceSetting,
    CountUsers,
    UpsertAccessToken,
}

/// Delegates to a `MemoryStore` except for one method, which fails with a
/// database error.
#[derive(Debug)]
struct FailingStore {
    inner: MemoryStore,
    fail_on: FailOn,
}

impl FailingStore {
    fn check(&self, method: FailOn) -> AppResult<()> {
        if self.fail_on == method {
            Err(AppError::database(DRIVER_ERROR))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl UserStore for FailingStore {
    async fn find_user(&self, find: &FindUser) -> AppResult<Option<User>> {
        self.check(FailOn::FindUser)?;
        self.inner.find_user(find).await
    }

    async fn list_users(&self, find: &FindUser) -> AppResult<Vec<User>> {
        self.inner.list_users(find).await
    }

    async fn count_users(&self, find: &FindUser) -> AppResult<u64> {
        self.check(FailOn::CountUsers)?;
        self.inner.count_users(find).await
    }

    async fn create_user(&self, create: CreateUser) -> AppResult<User> {
        self.inner.create_user(create).await
    }
}

#[async_trait::async_trait]
impl WorkspaceSettingStore for FailingStore {
    async fn get_workspace_setting(
        &self,
        key: WorkspaceSettingKey,
    ) -> AppResult<Option<WorkspaceSetting>> {
        self.check(FailOn::GetWorkspaceSetting)?;
        self.inner.get_workspace_setting(key).await
    }

    async fn upsert_workspace_setting(
        &self,
        setting: WorkspaceSetting,
    ) -> AppResult<WorkspaceSetting> {
        self.inner.upsert_workspace_setting(setting).await
    }
}

#[async_trait::async_trait]
impl AccessTokenStore for FailingStore {
    async fn upsert_access_token(&self, user_id: UserId, token: AccessToken) -> AppResult<()> {
        self.check(FailOn::UpsertAccessToken)?;
        self.inner.upsert_access_token(user_id, token).await
    }

    async fn list_access_tokens(&self, user_id: UserId) -> AppResult<Vec<AccessToken>> {
        self.inner.list_access_tokens(user_id).await
    }
}

/// A service whose store fails on `fail_on`, plus the backing memory store.
fn failing_service(fail_on: FailOn) -> (AuthService, MemoryStore) {
    let inner = MemoryStore::new();
    let store = FailingStore {
        inner: inner.clone(),
        fail_on,
    };
    let service = build_service(
        Arc::new(store),
        &SigningSecret::new("service-test-secret"),
        false,
        Arc::new(RecordingMetrics::default()),
    );
    (service, inner)
}

fn assert_internal(err: &AppError, message: &str) {
    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.message, message);
    assert!(!err.message.contains(DRIVER_ERROR));
    assert!(err.chain().contains(DRIVER_ERROR));
}

fn sign_up_req(email: &str) -> SignUpRequest {
    SignUpRequest {
        email: email.to_string(),
        nickname: "Al".to_string(),
        password: "pw123456".to_string(),
    }
}

fn sign_in_req(email: &str, password: &str) -> SignInRequest {
    SignInRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

async fn set_signup_enabled(store: &MemoryStore, enabled: bool) {
    store
        .upsert_workspace_setting(WorkspaceSetting::new(WorkspaceSettingValue::EnableSignup(
            enabled,
        )))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_first_signup_on_empty_workspace_is_admin() {
    let h = harness(false);
    let ctx = RequestContext::new();

    let result = h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();

    assert_eq!(result.user.role, UserRole::Admin);
    assert_eq!(result.user.email, "a@x.com");
    assert!(!result.access_token.is_empty());
    assert_ne!(result.user.password_hash, "pw123456");
    assert_eq!(h.metrics.events(), ["user sign up"]);
}

#[tokio::test]
async fn test_second_signup_is_regular_user() {
    let h = harness(false);
    let ctx = RequestContext::new();

    h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();
    let second = h.service.sign_up(&ctx, sign_up_req("b@x.com")).await.unwrap();

    assert_eq!(second.user.role, UserRole::User);
}

#[tokio::test]
async fn test_concurrent_first_signups_yield_one_admin() {
    let h = harness(false);
    let ctx = RequestContext::new();

    let (a, b) = tokio::join!(
        h.service.sign_up(&ctx, sign_up_req("a@x.com")),
        h.service.sign_up(&ctx, sign_up_req("b@x.com")),
    );
    let roles = [a.unwrap().user.role, b.unwrap().user.role];

    assert_eq!(roles.iter().filter(|r| r.is_admin()).count(), 1);
}

#[tokio::test]
async fn test_signup_quota_boundary_at_five_users() {
    let h = harness(false);
    let ctx = RequestContext::new();

    for i in 0..4 {
        h.service
            .sign_up(&ctx, sign_up_req(&format!("user{i}@x.com")))
            .await
            .unwrap();
    }
    // Four existing users: the fifth account is still allowed.
    h.service.sign_up(&ctx, sign_up_req("user4@x.com")).await.unwrap();

    let err = h
        .service
        .sign_up(&ctx, sign_up_req("user5@x.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadRequest);
    assert!(err.message.contains("maximum number of users reached"));
}

#[tokio::test]
async fn test_unlimited_license_skips_quota() {
    let h = harness(true);
    let ctx = RequestContext::new();

    for i in 0..6 {
        h.service
            .sign_up(&ctx, sign_up_req(&format!("user{i}@x.com")))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_disabled_signup_beats_unlimited_license() {
    let h = harness(true);
    set_signup_enabled(&h.store, false).await;

    let err = h
        .service
        .sign_up(&RequestContext::new(), sign_up_req("a@x.com"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(err.message, "signup disabled");
    assert!(h.metrics.events().is_empty());
}

#[tokio::test]
async fn test_explicitly_enabled_signup_allows() {
    let h = harness(false);
    set_signup_enabled(&h.store, true).await;

    h.service
        .sign_up(&RequestContext::new(), sign_up_req("a@x.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_duplicate_email_is_internal() {
    let h = harness(false);
    let ctx = RequestContext::new();
    h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();

    let err = h
        .service
        .sign_up(&ctx, sign_up_req("A@x.com"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.message, "failed to create user");
    assert!(err.chain().contains("CONFLICT"));
}

#[tokio::test]
async fn test_sign_in_token_expires_after_fixed_duration() {
    let h = harness(false);
    let ctx = RequestContext::new();
    let created = h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();

    let before = Utc::now();
    let result = h
        .service
        .sign_in(&ctx, sign_in_req("a@x.com", "pw123456"))
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(result.user.id, created.user.id);
    let issued_at = result.expires_at - ACCESS_TOKEN_DURATION;
    assert!(before <= issued_at && issued_at <= after);

    let claims = h.decoder.decode(&result.access_token).unwrap();
    assert_eq!(claims.exp, result.expires_at.timestamp());
    assert_eq!(claims.user_id().unwrap(), created.user.id);
    assert_eq!(claims.name, "a@x.com");

    let tokens = h.store.list_access_tokens(created.user.id).await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t.description == USER_LOGIN_DESCRIPTION));
    assert_eq!(h.metrics.events(), ["user sign up", "user sign in"]);
}

#[tokio::test]
async fn test_sign_in_failures_share_one_message() {
    let h = harness(false);
    let ctx = RequestContext::new();
    h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();

    let unknown = h
        .service
        .sign_in(&ctx, sign_in_req("nobody@x.com", "pw123456"))
        .await
        .unwrap_err();
    let wrong = h
        .service
        .sign_in(&ctx, sign_in_req("a@x.com", "pw1234567"))
        .await
        .unwrap_err();

    assert_eq!(unknown.kind, ErrorKind::Unauthorized);
    assert_eq!(wrong.kind, ErrorKind::Unauthorized);
    assert_eq!(unknown.message, wrong.message);
    assert_eq!(unknown.message, "unmatched email and password");
}

#[tokio::test]
async fn test_archived_user_is_forbidden_regardless_of_password() {
    let h = harness(false);
    let ctx = RequestContext::new();
    let created = h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();
    assert!(h.store.archive_user(created.user.id).await);

    for password in ["pw123456", "wrong"] {
        let err = h
            .service
            .sign_in(&ctx, sign_in_req("a@x.com", password))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert_eq!(err.message, "user has been archived");
    }
}

#[tokio::test]
async fn test_unreadable_stored_hash_is_unauthorized() {
    let h = harness(false);
    h.store
        .create_user(CreateUser {
            email: "legacy@x.com".to_string(),
            nickname: "Legacy".to_string(),
            password_hash: "$2a$10$not-an-argon2-hash".to_string(),
            role: UserRole::User,
        })
        .await
        .unwrap();

    let err = h
        .service
        .sign_in(&RequestContext::new(), sign_in_req("legacy@x.com", "pw123456"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.message, "unmatched email and password");
}

#[tokio::test]
async fn test_each_sign_in_issues_a_distinct_valid_token() {
    let h = harness(false);
    let ctx = RequestContext::new();
    h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();

    let first = h
        .service
        .sign_in(&ctx, sign_in_req("a@x.com", "pw123456"))
        .await
        .unwrap();
    let second = h
        .service
        .sign_in(&ctx, sign_in_req("a@x.com", "pw123456"))
        .await
        .unwrap();

    assert_ne!(first.access_token, second.access_token);
    assert!(h.decoder.decode(&first.access_token).is_ok());
    assert!(h.decoder.decode(&second.access_token).is_ok());
}

#[tokio::test]
async fn test_cancelled_request_creates_nothing() {
    let h = harness(false);
    let ctx = RequestContext::new();
    ctx.cancel();

    let err = h
        .service
        .sign_up(&ctx, sign_up_req("a@x.com"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Cancelled);
    assert_eq!(
        h.store
            .count_users(&linkhub_entity::user::FindUser::default())
            .await
            .unwrap(),
        0
    );
}

#[test]
fn test_sign_out_clears_cookie() {
    let h = harness(false);
    let mut metadata = RecordingMetadata::default();

    h.service.sign_out(&mut metadata).unwrap();

    assert_eq!(
        metadata.0,
        [("linkhub.access-token".to_string(), String::new())]
    );
}

#[test]
fn test_sign_out_header_failure_is_internal() {
    let h = harness(false);
    let err = h.service.sign_out(&mut ClosedMetadata).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Internal);
}

#[tokio::test]
async fn test_auth_status_resolves_token_owner() {
    let h = harness(false);
    let ctx = RequestContext::new();
    let created = h.service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap();

    let user = h
        .service
        .auth_status(&ctx, Some(created.access_token.as_str()))
        .await
        .unwrap();
    assert_eq!(user.id, created.user.id);

    let missing = h.service.auth_status(&ctx, None).await.unwrap_err();
    assert_eq!(missing.kind, ErrorKind::Unauthorized);
    let garbage = h
        .service
        .auth_status(&ctx, Some("not-a-token"))
        .await
        .unwrap_err();
    assert_eq!(garbage.kind, ErrorKind::Unauthorized);

    h.store.archive_user(created.user.id).await;
    let archived = h
        .service
        .auth_status(&ctx, Some(created.access_token.as_str()))
        .await
        .unwrap_err();
    assert_eq!(archived.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_sign_in_store_failure_is_internal() {
    let (service, _) = failing_service(FailOn::FindUser);
    let ctx = RequestContext::new();

    let err = service
        .sign_in(&ctx, sign_in_req("a@x.com", "pw123456"))
        .await
        .unwrap_err();

    assert_internal(&err, "failed to find user by email");
}

#[tokio::test]
async fn test_sign_up_setting_failure_is_internal() {
    let (service, store) = failing_service(FailOn::GetWorkspaceSetting);
    let ctx = RequestContext::new();

    let err = service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap_err();

    assert_internal(&err, "failed to get workspace setting");
    assert_eq!(store.count_users(&FindUser::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_sign_up_count_failure_is_internal() {
    let (service, store) = failing_service(FailOn::CountUsers);
    let ctx = RequestContext::new();

    let err = service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap_err();

    assert_internal(&err, "failed to count users");
    assert_eq!(store.count_users(&FindUser::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_token_record_failure_keeps_created_user() {
    let (service, store) = failing_service(FailOn::UpsertAccessToken);
    let ctx = RequestContext::new();

    let err = service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap_err();

    assert_internal(&err, "failed to upsert access token to store");
    assert!(
        store
            .find_user(&FindUser::by_email("a@x.com"))
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_token_issue_failure_keeps_created_user() {
    let store = MemoryStore::new();
    let metrics = Arc::new(RecordingMetrics::default());
    let service = build_service(
        Arc::new(store.clone()),
        &SigningSecret::new(""),
        false,
        metrics.clone(),
    );
    let ctx = RequestContext::new();

    let err = service.sign_up(&ctx, sign_up_req("a@x.com")).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.message, "failed to generate access token");
    let users = store.list_users(&FindUser::default()).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "a@x.com");
    assert!(store.list_access_tokens(users[0].id).await.unwrap().is_empty());
    assert!(metrics.events().is_empty());
}
