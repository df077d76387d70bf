//! Access-token audit records.

pub mod model;

pub use model::{AccessToken, USER_LOGIN_DESCRIPTION};
