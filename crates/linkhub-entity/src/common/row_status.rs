//! Row lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle flag distinguishing active rows from soft-deleted ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RowStatus {
    /// Active row.
    #[default]
    Normal,
    /// Soft-deleted row; kept for history, hidden from normal use.
    Archived,
}

impl RowStatus {
    /// Return the canonical uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Archived => "ARCHIVED",
        }
    }

    /// Check if this row has been archived.
    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RowStatus {
    type Err = linkhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(linkhub_core::AppError::validation(format!(
                "Invalid row status: '{s}'. Expected one of: NORMAL, ARCHIVED"
            ))),
        }
    }
}
