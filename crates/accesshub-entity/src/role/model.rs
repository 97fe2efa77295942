//! Role entity model.
//!
//! A role embeds value copies of permissions taken at attach time. Later
//! edits to the canonical [`Permission`](crate::permission::Permission)
//! records do not propagate into roles that already hold a copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::{AccessAction, Permission};

/// An embedded snapshot of a permission at the time it was attached to a
/// role. Owned by the role; discarded when the role is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Permission name at attach time.
    pub name: String,
    /// Stable lookup key. Grants within one role are unique by key.
    pub key: String,
    /// Description at attach time.
    pub description: Option<String>,
    /// Read flag at attach time.
    pub read: bool,
    /// Write flag at attach time.
    pub write: bool,
    /// Delete flag at attach time.
    pub delete: bool,
    /// Active flag at attach time.
    pub is_active: bool,
}

impl PermissionGrant {
    /// Check whether this grant allows the given action.
    pub fn allows(&self, action: AccessAction) -> bool {
        match action {
            AccessAction::Read => self.read,
            AccessAction::Write => self.write,
            AccessAction::Delete => self.delete,
        }
    }
}

impl From<&Permission> for PermissionGrant {
    fn from(permission: &Permission) -> Self {
        Self {
            name: permission.name.clone(),
            key: permission.key.clone(),
            description: permission.description.clone(),
            read: permission.read,
            write: permission.write,
            delete: permission.delete,
            is_active: permission.is_active,
        }
    }
}

/// A named, reusable bundle of permission snapshots assignable to users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Globally unique role name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the role appears in listings.
    pub is_active: bool,
    /// Embedded permission snapshots, unique by key.
    pub permissions: Vec<PermissionGrant>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Check whether the role already embeds a grant with the given key.
    pub fn has_grant(&self, key: &str) -> bool {
        self.permissions.iter().any(|grant| grant.key == key)
    }

    /// Merge the given grants into the role's set.
    ///
    /// Grants whose key is already present are dropped. Returns how many
    /// grants were actually added.
    pub fn merge_grants(&mut self, grants: &[PermissionGrant]) -> usize {
        let mut added = 0;
        for grant in grants {
            if !self.has_grant(&grant.key) {
                self.permissions.push(grant.clone());
                added += 1;
            }
        }
        added
    }

    /// Remove every embedded grant whose key appears in `keys`.
    ///
    /// Returns how many grants were removed.
    pub fn remove_grants(&mut self, keys: &[String]) -> usize {
        let before = self.permissions.len();
        self.permissions
            .retain(|grant| !keys.iter().any(|key| key == &grant.key));
        before - self.permissions.len()
    }
}

/// Data required to create a new role.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRole {
    /// Globally unique role name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Initial permission snapshots.
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(key: &str) -> PermissionGrant {
        PermissionGrant {
            name: key.to_uppercase(),
            key: key.to_string(),
            description: None,
            read: true,
            write: false,
            delete: false,
            is_active: true,
        }
    }

    fn role_with(grants: Vec<PermissionGrant>) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: "editors".to_string(),
            description: None,
            is_active: true,
            permissions: grants,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_drops_duplicate_keys() {
        let mut role = role_with(vec![grant("inventory")]);
        let added = role.merge_grants(&[grant("inventory"), grant("sales")]);
        assert_eq!(added, 1);
        assert_eq!(role.permissions.len(), 2);
    }

    #[test]
    fn test_remove_matches_every_grant_with_key() {
        let mut role = role_with(vec![grant("inventory"), grant("sales")]);
        let removed = role.remove_grants(&["inventory".to_string()]);
        assert_eq!(removed, 1);
        assert!(!role.has_grant("inventory"));
        assert!(role.has_grant("sales"));
    }

    #[test]
    fn test_grant_is_a_value_copy() {
        let mut permission = Permission {
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
        let snapshot = PermissionGrant::from(&permission);

        permission.write = false;
        permission.is_active = false;

        assert!(snapshot.write);
        assert!(snapshot.is_active);
    }
}
