//! User CRUD, credential storage, and role assignment.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use accesshub_auth::password::{PasswordHasher, PasswordPolicy};
use accesshub_core::error::AppError;
use accesshub_entity::user::{CreateUser, UpdateUser, User};
use accesshub_store::traits::{RoleStore, UserStore};

/// Handles user lifecycle operations.
///
/// Plaintext passwords never reach the store: they are policy-checked and
/// hashed here, and the hash is what gets persisted.
#[derive(Clone)]
pub struct UserService {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Role persistence, for assignment checks.
    roles: Arc<dyn RoleStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: Arc<PasswordPolicy>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<PasswordPolicy>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
            policy,
        }
    }

    /// Registers a new user.
    ///
    /// Fails with `Validation` when the password misses the policy and with
    /// `Conflict` when the email is already registered.
    pub async fn create_user(&self, data: CreateUser) -> Result<User, AppError> {
        self.policy.validate(&data.password)?;

        let password_hash = self.hasher.hash_password(&data.password)?;

        let mut roles = data.roles;
        roles.sort_unstable();
        roles.dedup();

        let now = Utc::now();
        let user = self
            .users
            .insert(User {
                id: Uuid::new_v4(),
                given_name: data.given_name,
                surname: data.surname,
                email: data.email,
                password_hash,
                phone_number: data.phone_number,
                job_title: data.job_title,
                office_location: data.office_location,
                roles,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(user_id = %user.id, "User created");

        Ok(user)
    }

    /// Fetches a user by ID.
    pub async fn get_user(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Fetches a user by email (case-insensitive).
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_email(email).await
    }

    /// Lists all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.find_all().await
    }

    /// Updates a user's profile fields.
    pub async fn update_user(&self, user_id: Uuid, data: UpdateUser) -> Result<User, AppError> {
        let mut user = self.get_user(user_id).await?;

        if let Some(given_name) = data.given_name {
            user.given_name = given_name;
        }
        if let Some(surname) = data.surname {
            user.surname = Some(surname);
        }
        if let Some(email) = data.email {
            user.email = email;
        }
        if let Some(phone_number) = data.phone_number {
            user.phone_number = Some(phone_number);
        }
        if let Some(job_title) = data.job_title {
            user.job_title = Some(job_title);
        }
        if let Some(office_location) = data.office_location {
            user.office_location = Some(office_location);
        }

        self.users.update(user).await
    }

    /// Rehashes and overwrites a user's password.
    ///
    /// Live refresh tokens are left untouched; revocation is the
    /// authentication engine's call to make.
    pub async fn update_password(
        &self,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        self.policy.validate(new_password)?;
        let password_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &password_hash).await?;

        info!(%user_id, "Password updated");

        Ok(())
    }

    /// Hard-deletes a user.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(%user_id, "User deleted");

        Ok(())
    }

    /// Adds a role reference to a user. Idempotent when already assigned.
    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<User, AppError> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        let mut user = self.get_user(user_id).await?;
        if user.has_role(role_id) {
            return Ok(user);
        }

        user.roles.push(role_id);
        let user = self.users.update(user).await?;

        info!(%user_id, %role_id, "Role assigned");

        Ok(user)
    }
}
