//! # accesshub-store
//!
//! Store abstractions and backends for AccessHub.
//!
//! The backing document database is an external collaborator; services only
//! see the traits in [`traits`]. The [`memory`] module provides the
//! process-local backend used in tests and single-node deployments, with
//! uniqueness scans standing in for the database's unique indexes.

pub mod traits;

#[cfg(feature = "memory")]
pub mod memory;

pub use traits::{PermissionStore, RoleStore, TokenStore, UserStore};

#[cfg(feature = "memory")]
pub use memory::{MemoryPermissionStore, MemoryRoleStore, MemoryTokenStore, MemoryUserStore};
