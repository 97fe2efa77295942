//! In-memory role store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use accesshub_core::error::AppError;
use accesshub_core::result::AppResult;
use accesshub_entity::role::Role;

use crate::traits::RoleStore;

/// In-memory role store keyed by role ID with a unique-name scan.
///
/// Updates replace the whole document, so concurrent grant merges on one
/// role resolve last-write-wins.
#[derive(Debug, Default)]
pub struct MemoryRoleStore {
    roles: DashMap<Uuid, Role>,
}

impl MemoryRoleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> bool {
        self.roles
            .iter()
            .any(|entry| entry.value().name == name && Some(*entry.key()) != exclude)
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>> {
        Ok(self.roles.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .iter()
            .find(|entry| entry.value().name == name)
            .map(|entry| entry.value().clone()))
    }

    async fn find_active(&self) -> AppResult<Vec<Role>> {
        Ok(self
            .roles
            .iter()
            .filter(|entry| entry.value().is_active)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn insert(&self, role: Role) -> AppResult<Role> {
        if self.name_taken(&role.name, None) {
            return Err(AppError::conflict("Role already taken"));
        }
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update(&self, mut role: Role) -> AppResult<Role> {
        if !self.roles.contains_key(&role.id) {
            return Err(AppError::not_found(format!("Role {} not found", role.id)));
        }
        if self.name_taken(&role.name, Some(role.id)) {
            return Err(AppError::conflict("Role already taken"));
        }
        role.updated_at = Utc::now();
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn delete(&self, role_id: Uuid) -> AppResult<bool> {
        Ok(self.roles.remove(&role_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesshub_core::error::ErrorKind;

    fn role(name: &str) -> Role {
        Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            is_active: true,
            permissions: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_name() {
        let store = MemoryRoleStore::new();
        store.insert(role("editors")).await.unwrap();

        let err = store.insert(role("editors")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_update_missing_role_is_not_found() {
        let store = MemoryRoleStore::new();
        let err = store.update(role("ghost")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_discards_embedded_grants() {
        let store = MemoryRoleStore::new();
        let created = store.insert(role("editors")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
    }
}
