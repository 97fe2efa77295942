//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::AccessAction;

/// A named, uniquely-keyed capability record in the permission catalog.
///
/// The (name, key) pair is unique across active and inactive records
/// combined. Permissions are never physically removed; deactivation flips
/// `is_active` and retains the record for audit history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Human-readable permission name.
    pub name: String,
    /// Stable lookup key, e.g. `"inventory"`.
    pub key: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the permission grants read access.
    pub read: bool,
    /// Whether the permission grants write access.
    pub write: bool,
    /// Whether the permission grants delete access.
    pub delete: bool,
    /// Logical-deletion flag. Inactive permissions are hidden from listings
    /// but still block name/key reuse.
    pub is_active: bool,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
    /// When the permission was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    /// Check whether this permission grants the given action.
    pub fn allows(&self, action: AccessAction) -> bool {
        match action {
            AccessAction::Read => self.read,
            AccessAction::Write => self.write,
            AccessAction::Delete => self.delete,
        }
    }
}

/// Data required to create a new permission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePermission {
    /// Human-readable permission name.
    pub name: String,
    /// Stable lookup key.
    pub key: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Read flag (defaults to false).
    #[serde(default)]
    pub read: bool,
    /// Write flag (defaults to false).
    #[serde(default)]
    pub write: bool,
    /// Delete flag (defaults to false).
    #[serde(default)]
    pub delete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_maps_flags() {
        let permission = Permission {
            id: Uuid::new_v4(),
            name: "Inventory".to_string(),
            key: "inventory".to_string(),
            description: None,
            read: true,
            write: true,
            delete: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(permission.allows(AccessAction::Read));
        assert!(permission.allows(AccessAction::Write));
        assert!(!permission.allows(AccessAction::Delete));
    }
}
