//! # linkhub-auth
//!
//! Authentication building blocks for LinkHub.
//!
//! ## Modules
//!
//! - `jwt`: session token issuance and validation
//! - `password`: Argon2id credential hashing
//! - `policy`: pure account-provisioning rules

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{
    ACCESS_TOKEN_COOKIE_NAME, ACCESS_TOKEN_DURATION, Claims, JwtDecoder, JwtEncoder,
    SigningSecret,
};
pub use password::PasswordHasher;
pub use policy::{SignupDecision, SignupDenial};
