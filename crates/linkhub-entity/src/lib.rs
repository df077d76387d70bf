//! # linkhub-entity
//!
//! Domain entity models for LinkHub. Every struct in this crate represents
//! a stored record or a domain value object consumed by the auth core.
//! Enums carry an explicit canonical string form so that stores can
//! persist them as plain text.

pub mod access_token;
pub mod common;
pub mod user;
pub mod workspace;
