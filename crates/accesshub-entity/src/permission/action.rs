//! Capability flags checked during authorization.

use serde::{Deserialize, Serialize};

/// The action requested against a permission key.
///
/// Maps one-to-one onto the `read` / `write` / `delete` flags carried by
/// [`Permission`](super::Permission) records and their embedded snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    /// View the resource guarded by the key.
    Read,
    /// Create or modify the resource.
    Write,
    /// Remove the resource.
    Delete,
}

impl AccessAction {
    /// Return the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for AccessAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
