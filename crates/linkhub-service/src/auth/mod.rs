//! Sign-in, sign-up and sign-out.

pub mod service;

pub use service::{AuthResult, AuthService, SignInRequest, SignUpRequest};

#[cfg(test)]
mod tests;
