//! Permission catalog service.

pub mod service;

pub use service::PermissionService;
