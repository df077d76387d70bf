//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use linkhub_core::config::AppConfig;
use linkhub_database::MemoryStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store shared with the router, for seeding and inspection
    pub store: MemoryStore,
}

impl TestApp {
    /// Create a test application on the free plan
    pub async fn new() -> Self {
        Self::with_plan("free").await
    }

    /// Create a test application on the given license plan
    pub async fn with_plan(plan: &str) -> Self {
        let mut config = AppConfig::default();
        config.auth.secret = "integration-test-secret".to_string();
        config.auth.hash_memory_kib = 8;
        config.auth.hash_iterations = 1;
        config.auth.hash_parallelism = 1;
        config.license.plan = plan.to_string();
        config.metrics.enabled = false;

        let store = MemoryStore::new();
        let state = linkhub_api::build_state(config, Arc::new(store.clone()))
            .await
            .expect("Failed to build app state");

        Self {
            router: linkhub_api::build_router(state),
            store,
        }
    }

    /// Send a JSON request, optionally with a bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req, body).await
    }

    /// Send a request carrying a raw `Cookie` header
    pub async fn request_with_cookie(&self, method: &str, path: &str, cookie: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Cookie", cookie);

        self.send(req, None).await
    }

    /// Sign up and return the response
    pub async fn sign_up(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v2/auth/signup",
            Some(serde_json::json!({
                "email": email,
                "nickname": "Tester",
                "password": password,
            })),
            None,
        )
        .await
    }

    /// Sign in and return the response
    pub async fn sign_in(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v2/auth/signin",
            Some(serde_json::json!({
                "email": email,
                "password": password,
            })),
            None,
        )
        .await
    }

    async fn send(&self, req: axum::http::request::Builder, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Simplified response for assertions
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
    }

    /// `data.access_token` of an auth response
    pub fn access_token(&self) -> &str {
        self.body["data"]["access_token"]
            .as_str()
            .expect("response has no access token")
    }
}
