//! # linkhub-service
//!
//! Business logic service layer for LinkHub. Services orchestrate the
//! store, the credential hasher, the token issuer and the account policy
//! to implement the authentication use cases.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod license;
pub mod metric;
pub mod workspace;

pub use auth::{AuthResult, AuthService, SignInRequest, SignUpRequest};
pub use context::RequestContext;
pub use license::PlanLicense;
pub use metric::{MetricCollector, metrics_sink};
pub use workspace::resolve_signing_secret;
