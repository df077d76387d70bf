//! Visibility of shared rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who may see a shared row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Visibility {
    /// Anyone, including anonymous visitors.
    Public,
    /// Any signed-in member of the workspace.
    Workspace,
    /// Only the creator.
    #[default]
    Private,
}

impl Visibility {
    /// Return the canonical uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Workspace => "WORKSPACE",
            Self::Private => "PRIVATE",
        }
    }

    /// Parse a stored value. Unrecognized input maps to [`Visibility::Private`]
    /// so that a corrupt value never widens access.
    pub fn parse_or_private(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PUBLIC" => Self::Public,
            "WORKSPACE" => Self::Workspace,
            _ => Self::Private,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Visibility {
    fn from(s: &str) -> Self {
        Self::parse_or_private(s)
    }
}

impl From<String> for Visibility {
    fn from(s: String) -> Self {
        Self::parse_or_private(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(Visibility::from("PUBLIC"), Visibility::Public);
        assert_eq!(Visibility::from("workspace"), Visibility::Workspace);
        assert_eq!(Visibility::Private.to_string(), "PRIVATE");
    }

    #[test]
    fn test_unknown_falls_back_to_private() {
        assert_eq!(Visibility::from(""), Visibility::Private);
        assert_eq!(Visibility::from("EVERYONE"), Visibility::Private);
    }

    #[test]
    fn test_deserialize_unknown_falls_back_to_private() {
        let parsed: Visibility = serde_json::from_str("\"EVERYONE\"").unwrap();
        assert_eq!(parsed, Visibility::Private);

        let parsed: Visibility = serde_json::from_str("\"public\"").unwrap();
        assert_eq!(parsed, Visibility::Public);
        assert_eq!(serde_json::to_string(&Visibility::Workspace).unwrap(), "\"WORKSPACE\"");
    }
}
