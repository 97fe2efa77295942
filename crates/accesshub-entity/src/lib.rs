//! # accesshub-entity
//!
//! Domain entity models for AccessHub. Every struct in this crate represents
//! a document in the backing store or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod permission;
pub mod role;
pub mod token;
pub mod user;
