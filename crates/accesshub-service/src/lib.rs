//! # accesshub-service
//!
//! Business services for AccessHub. Each service wraps the store traits and
//! auth machinery behind the operations the surrounding application calls:
//!
//! - [`user::UserService`] — registration, profile CRUD, role assignment
//! - [`permission::PermissionService`] — the permission catalog
//! - [`role::RoleService`] — role bundles of permission snapshots
//! - [`auth::AuthService`] — login, token refresh, password reset,
//!   authorization checks

pub mod auth;
pub mod notify;
pub mod permission;
pub mod role;
pub mod user;

pub use auth::{Authenticated, AuthService};
pub use notify::LogNotifier;
pub use permission::PermissionService;
pub use role::RoleService;
pub use user::UserService;
