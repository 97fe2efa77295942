//! Permission catalog operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use accesshub_core::error::AppError;
use accesshub_entity::permission::{CreatePermission, Permission};
use accesshub_store::traits::PermissionStore;

/// Manages the catalog of named capability records.
#[derive(Clone)]
pub struct PermissionService {
    /// Permission persistence.
    permissions: Arc<dyn PermissionStore>,
}

impl PermissionService {
    /// Creates a new permission service.
    pub fn new(permissions: Arc<dyn PermissionStore>) -> Self {
        Self { permissions }
    }

    /// Lists active permissions.
    pub async fn list(&self) -> Result<Vec<Permission>, AppError> {
        self.permissions.find_active().await
    }

    /// Creates a permission.
    ///
    /// Fails with `Conflict` when the name or key collides with any record,
    /// active or deactivated.
    pub async fn create(&self, data: CreatePermission) -> Result<Permission, AppError> {
        let now = Utc::now();
        let permission = self
            .permissions
            .insert(Permission {
                id: Uuid::new_v4(),
                name: data.name,
                key: data.key,
                description: data.description,
                read: data.read,
                write: data.write,
                delete: data.delete,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(permission_id = %permission.id, key = %permission.key, "Permission created");

        Ok(permission)
    }

    /// Fetches a permission by ID.
    pub async fn get(&self, permission_id: Uuid) -> Result<Permission, AppError> {
        self.permissions
            .find_by_id(permission_id)
            .await?
            .ok_or_else(|| AppError::not_found("Permission not found"))
    }

    /// Logically deletes a permission by clearing `is_active`.
    ///
    /// The record is retained for history and keeps blocking name/key
    /// reuse. Idempotent on an already-inactive record.
    pub async fn deactivate(&self, permission_id: Uuid) -> Result<Permission, AppError> {
        let mut permission = self.get(permission_id).await?;
        if !permission.is_active {
            return Ok(permission);
        }

        permission.is_active = false;
        let permission = self.permissions.update(permission).await?;

        info!(%permission_id, "Permission deactivated");

        Ok(permission)
    }
}
