//! Workspace setting entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys of the deployment-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceSettingKey {
    /// Whether visitors may create their own accounts.
    EnableSignup,
    /// Session token signing secret generated on first start.
    SecretSession,
}

impl WorkspaceSettingKey {
    /// Return the canonical key string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnableSignup => "ENABLE_SIGNUP",
            Self::SecretSession => "SECRET_SESSION",
        }
    }
}

impl fmt::Display for WorkspaceSettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkspaceSettingKey {
    type Err = linkhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENABLE_SIGNUP" => Ok(Self::EnableSignup),
            "SECRET_SESSION" => Ok(Self::SecretSession),
            _ => Err(linkhub_core::AppError::validation(format!(
                "Unknown workspace setting key: '{s}'"
            ))),
        }
    }
}

/// Typed value of a workspace setting; the variant determines the key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceSettingValue {
    /// Signup toggle.
    EnableSignup(bool),
    /// Token signing secret.
    SecretSession(String),
}

impl WorkspaceSettingValue {
    /// The key this value is stored under.
    pub fn key(&self) -> WorkspaceSettingKey {
        match self {
            Self::EnableSignup(_) => WorkspaceSettingKey::EnableSignup,
            Self::SecretSession(_) => WorkspaceSettingKey::SecretSession,
        }
    }

    /// Encode the payload alone (without the key) as JSON.
    pub fn to_payload(&self) -> Result<serde_json::Value, linkhub_core::AppError> {
        let mut tagged = serde_json::to_value(self)?;
        Ok(tagged
            .get_mut("value")
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null))
    }

    /// Decode a payload previously produced by [`Self::to_payload`].
    pub fn from_payload(
        key: WorkspaceSettingKey,
        payload: serde_json::Value,
    ) -> Result<Self, linkhub_core::AppError> {
        let tagged = serde_json::json!({ "key": key.as_str(), "value": payload });
        Ok(serde_json::from_value(tagged)?)
    }
}

impl fmt::Debug for WorkspaceSettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnableSignup(enabled) => f.debug_tuple("EnableSignup").field(enabled).finish(),
            Self::SecretSession(_) => f.debug_tuple("SecretSession").field(&"[redacted]").finish(),
        }
    }
}

/// A stored workspace setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSetting {
    /// Typed value.
    pub value: WorkspaceSettingValue,
    /// When the setting was last written.
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceSetting {
    /// Create a setting stamped with the current time.
    pub fn new(value: WorkspaceSettingValue) -> Self {
        Self {
            value,
            updated_at: Utc::now(),
        }
    }

    /// The key this setting is stored under.
    pub fn key(&self) -> WorkspaceSettingKey {
        self.value.key()
    }

    /// The signup toggle, if this is the `ENABLE_SIGNUP` setting.
    pub fn enable_signup(&self) -> Option<bool> {
        match self.value {
            WorkspaceSettingValue::EnableSignup(enabled) => Some(enabled),
            _ => None,
        }
    }

    /// The signing secret, if this is the `SECRET_SESSION` setting.
    pub fn secret_session(&self) -> Option<&str> {
        match &self.value {
            WorkspaceSettingValue::SecretSession(secret) => Some(secret),
            _ => None,
        }
    }
}
