//! Per-request context carrying cancellation and the request deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;

/// Context for a single request.
///
/// Passed into every service method so that store and hashing calls stop
/// promptly once the caller goes away or the deadline passes. Work that
/// already completed is not rolled back.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation ID for logs.
    pub request_id: Uuid,
    /// Fired when the caller aborts.
    cancel: CancellationToken,
    /// Instant after which outstanding calls fail with `Cancelled`.
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context with no deadline.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            cancel: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Creates a context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            ..Self::new()
        }
    }

    /// Replaces the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// The token that aborts this request.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Aborts the request.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Runs `fut` unless the request is cancelled or its deadline passes first.
    pub async fn guard<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(AppError::cancelled("request cancelled")),
            _ = deadline => Err(AppError::cancelled("request deadline exceeded")),
            result = fut => result,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
