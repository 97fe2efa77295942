//! In-memory permission store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use accesshub_core::error::AppError;
use accesshub_core::result::AppResult;
use accesshub_entity::permission::Permission;

use crate::traits::PermissionStore;

/// In-memory permission store keyed by permission ID.
///
/// Name and key uniqueness spans active and inactive records: a deactivated
/// permission still blocks reuse of its name and key.
#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    permissions: DashMap<Uuid, Permission>,
}

impl MemoryPermissionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>> {
        Ok(self.permissions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_active(&self) -> AppResult<Vec<Permission>> {
        Ok(self
            .permissions
            .iter()
            .filter(|entry| entry.value().is_active)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn name_or_key_taken(&self, name: &str, key: &str) -> AppResult<bool> {
        Ok(self
            .permissions
            .iter()
            .any(|entry| entry.value().name == name || entry.value().key == key))
    }

    async fn insert(&self, permission: Permission) -> AppResult<Permission> {
        if self
            .name_or_key_taken(&permission.name, &permission.key)
            .await?
        {
            return Err(AppError::conflict("Permission already taken"));
        }
        self.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn update(&self, mut permission: Permission) -> AppResult<Permission> {
        if !self.permissions.contains_key(&permission.id) {
            return Err(AppError::not_found(format!(
                "Permission {} not found",
                permission.id
            )));
        }
        permission.updated_at = Utc::now();
        self.permissions.insert(permission.id, permission.clone());
        Ok(permission)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.permissions.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesshub_core::error::ErrorKind;

    fn permission(name: &str, key: &str) -> Permission {
        Permission {
            id: Uuid::new_v4(),
            name: name.to_string(),
            key: key.to_string(),
            description: None,
            read: true,
            write: false,
            delete: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_key_with_different_name() {
        let store = MemoryPermissionStore::new();
        store.insert(permission("X", "K")).await.unwrap();

        let err = store.insert(permission("Y", "K")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_name_with_different_key() {
        let store = MemoryPermissionStore::new();
        store.insert(permission("X", "K")).await.unwrap();

        let err = store.insert(permission("X", "L")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_inactive_record_still_blocks_reuse() {
        let store = MemoryPermissionStore::new();
        let mut created = store.insert(permission("X", "K")).await.unwrap();
        created.is_active = false;
        store.update(created).await.unwrap();

        assert!(store.name_or_key_taken("X", "other").await.unwrap());
        assert!(store.name_or_key_taken("other", "K").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_active_hides_deactivated_records() {
        let store = MemoryPermissionStore::new();
        let mut created = store.insert(permission("X", "K")).await.unwrap();
        store.insert(permission("Y", "L")).await.unwrap();

        created.is_active = false;
        store.update(created).await.unwrap();

        let active = store.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].key, "L");
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
