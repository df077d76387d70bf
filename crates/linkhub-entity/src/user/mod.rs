//! User domain entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, FindUser, User, emails_match};
pub use role::UserRole;
