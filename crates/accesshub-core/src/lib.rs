//! # accesshub-core
//!
//! Core crate for AccessHub. Contains store and notifier traits,
//! configuration schemas, telemetry setup, and the unified error system.
//!
//! This crate has **no** internal dependencies on other AccessHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod telemetry;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
