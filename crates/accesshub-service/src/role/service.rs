//! Role registry operations.
//!
//! Roles embed permission snapshots by value. Merges and removals are set
//! operations keyed by permission key, applied as one whole-document write.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use accesshub_core::error::AppError;
use accesshub_entity::role::{CreateRole, PermissionGrant, Role};
use accesshub_store::traits::RoleStore;

/// Manages role bundles and their embedded permission snapshots.
#[derive(Clone)]
pub struct RoleService {
    /// Role persistence.
    roles: Arc<dyn RoleStore>,
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// Lists active roles.
    pub async fn list(&self) -> Result<Vec<Role>, AppError> {
        self.roles.find_active().await
    }

    /// Fetches a role by ID.
    ///
    /// An absent role is `NotFound`; a store-layer failure folds into a
    /// generic `BadRequest` so lookup internals never leak.
    pub async fn get(&self, role_id: Uuid) -> Result<Role, AppError> {
        match self.roles.find_by_id(role_id).await {
            Ok(Some(role)) => Ok(role),
            Ok(None) => Err(AppError::not_found("Role not found")),
            Err(_) => Err(AppError::bad_request("Bad request")),
        }
    }

    /// Creates a role with an initial set of permission snapshots.
    ///
    /// Fails with `Conflict` when the name is taken. Incoming snapshots are
    /// deduplicated by key.
    pub async fn create(&self, data: CreateRole) -> Result<Role, AppError> {
        let mut permissions: Vec<PermissionGrant> = Vec::with_capacity(data.permissions.len());
        for grant in data.permissions {
            if !permissions.iter().any(|existing| existing.key == grant.key) {
                permissions.push(grant);
            }
        }

        let now = Utc::now();
        let role = self
            .roles
            .insert(Role {
                id: Uuid::new_v4(),
                name: data.name,
                description: data.description,
                is_active: true,
                permissions,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(role_id = %role.id, name = %role.name, "Role created");

        Ok(role)
    }

    /// Merges permission snapshots into a role.
    ///
    /// Snapshots whose key is already embedded are dropped. When every
    /// incoming key is already present the unchanged role is returned
    /// without touching the store.
    pub async fn add_permissions(
        &self,
        role_id: Uuid,
        permissions: Vec<PermissionGrant>,
    ) -> Result<Role, AppError> {
        let mut role = self.get(role_id).await?;

        if permissions.iter().all(|grant| role.has_grant(&grant.key)) {
            return Ok(role);
        }

        let added = role.merge_grants(&permissions);
        let role = self.roles.update(role).await?;

        info!(%role_id, added, "Permissions added to role");

        Ok(role)
    }

    /// Removes every embedded snapshot whose key matches any of the given
    /// permissions, in a single update.
    pub async fn remove_permissions(
        &self,
        role_id: Uuid,
        permissions: Vec<PermissionGrant>,
    ) -> Result<Role, AppError> {
        let mut role = self.get(role_id).await?;

        let keys: Vec<String> = permissions.into_iter().map(|grant| grant.key).collect();
        let removed = role.remove_grants(&keys);
        if removed == 0 {
            return Ok(role);
        }

        let role = self.roles.update(role).await?;

        info!(%role_id, removed, "Permissions removed from role");

        Ok(role)
    }

    /// Hard-deletes a role, discarding its embedded snapshots.
    pub async fn remove(&self, role_id: Uuid) -> Result<(), AppError> {
        if !self.roles.delete(role_id).await? {
            return Err(AppError::not_found("Role not found"));
        }

        info!(%role_id, "Role deleted");

        Ok(())
    }
}
