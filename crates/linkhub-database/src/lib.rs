//! # linkhub-database
//!
//! Store contracts consumed by the auth core, plus two implementations:
//! a process-local [`MemoryStore`] and a PostgreSQL-backed [`PgStore`].

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use repositories::PgStore;
pub use store::{AccessTokenStore, Store, UserStore, WorkspaceSettingStore};
