//! Role entity.

pub mod model;

pub use model::{CreateRole, PermissionGrant, Role};
