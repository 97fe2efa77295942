//! Store traits for pluggable document-database backends.
//!
//! Each entity gets its own capability trait. Backends must enforce the
//! unique indexes named in the method docs and surface violations as
//! `Conflict` errors.

use async_trait::async_trait;
use uuid::Uuid;

use accesshub_core::result::AppResult;
use accesshub_entity::permission::Permission;
use accesshub_entity::role::Role;
use accesshub_entity::token::{TokenKind, TokenRecord};
use accesshub_entity::user::User;

/// Persistence operations for user documents.
///
/// Backends enforce a case-insensitive unique index on `email`.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Store a new user. Fails with `Conflict` if the email is taken.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// Replace an existing user document. Fails with `NotFound` if absent
    /// and with `Conflict` if the new email collides with another user.
    async fn update(&self, user: User) -> AppResult<User>;

    /// Overwrite a user's password hash. Fails with `NotFound` if absent.
    async fn update_password(&self, user_id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Delete a user by ID. Returns `true` if a document was removed.
    async fn delete(&self, user_id: Uuid) -> AppResult<bool>;

    /// Count total users.
    async fn count(&self) -> AppResult<u64>;
}

/// Persistence operations for permission documents.
///
/// Backends enforce uniqueness of both `name` and `key` across active and
/// inactive records combined.
#[async_trait]
pub trait PermissionStore: Send + Sync + 'static {
    /// Find a permission by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Permission>>;

    /// List permissions with `is_active = true`.
    async fn find_active(&self) -> AppResult<Vec<Permission>>;

    /// Check whether any record (active or not) uses this name or key.
    async fn name_or_key_taken(&self, name: &str, key: &str) -> AppResult<bool>;

    /// Store a new permission. Fails with `Conflict` when the name or key
    /// collides with any existing record.
    async fn insert(&self, permission: Permission) -> AppResult<Permission>;

    /// Replace an existing permission document. Fails with `NotFound` if
    /// absent.
    async fn update(&self, permission: Permission) -> AppResult<Permission>;

    /// Count total permissions, active and inactive.
    async fn count(&self) -> AppResult<u64>;
}

/// Persistence operations for role documents.
///
/// Backends enforce a unique index on `name`.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Find a role by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Role>>;

    /// Find a role by its unique name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Role>>;

    /// List roles with `is_active = true`.
    async fn find_active(&self) -> AppResult<Vec<Role>>;

    /// Store a new role. Fails with `Conflict` if the name is taken.
    async fn insert(&self, role: Role) -> AppResult<Role>;

    /// Replace an existing role document in one write. Grant merges and
    /// removals go through this whole-document update. Fails with
    /// `NotFound` if absent.
    async fn update(&self, role: Role) -> AppResult<Role>;

    /// Delete a role by ID. Returns `true` if a document was removed.
    async fn delete(&self, role_id: Uuid) -> AppResult<bool>;
}

/// Persistence operations for refresh and reset-password token records.
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Store a new token record.
    async fn insert(&self, record: TokenRecord) -> AppResult<TokenRecord>;

    /// Find a live (unexpired) record by token digest and kind.
    async fn find_by_hash(&self, token_hash: &str, kind: TokenKind)
    -> AppResult<Option<TokenRecord>>;

    /// Atomically remove and return a live record by digest and kind.
    ///
    /// Of any number of concurrent callers racing on the same digest,
    /// exactly one receives the record; the rest receive `None`.
    async fn take_by_hash(&self, token_hash: &str, kind: TokenKind)
    -> AppResult<Option<TokenRecord>>;

    /// Delete every record of the given kind for a user. Returns the number
    /// of records removed.
    async fn delete_for_user(&self, user_id: Uuid, kind: TokenKind) -> AppResult<u64>;

    /// Sweep expired records. Returns the number of records removed.
    async fn purge_expired(&self) -> AppResult<u64>;
}
