//! In-memory user store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use accesshub_core::error::AppError;
use accesshub_core::result::AppResult;
use accesshub_entity::user::User;

use crate::traits::UserStore;

/// In-memory user store keyed by user ID.
///
/// Email uniqueness is enforced by a case-insensitive scan before insert.
/// Scan-then-insert is not perfectly atomic, but acceptable for a
/// single-node in-memory backend; a real document database enforces the
/// unique index itself.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<Uuid, User>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> bool {
        self.users.iter().any(|entry| {
            entry.value().email.eq_ignore_ascii_case(email) && Some(*entry.key()) != exclude
        })
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email.eq_ignore_ascii_case(email))
            .map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        if self.email_taken(&user.email, None) {
            return Err(AppError::conflict("Email already in use"));
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> AppResult<User> {
        if !self.users.contains_key(&user.id) {
            return Err(AppError::not_found(format!("User {} not found", user.id)));
        }
        if self.email_taken(&user.email, Some(user.id)) {
            return Err(AppError::conflict("Email already in use"));
        }
        user.updated_at = Utc::now();
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()> {
        match self.users.get_mut(&user_id) {
            Some(mut entry) => {
                let user = entry.value_mut();
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(())
            }
            None => Err(AppError::not_found(format!("User {user_id} not found"))),
        }
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        Ok(self.users.remove(&user_id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}
