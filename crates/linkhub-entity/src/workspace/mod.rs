//! Deployment-wide workspace settings.

pub mod setting;

pub use setting::{WorkspaceSetting, WorkspaceSettingKey, WorkspaceSettingValue};
