//! Authentication engine.

pub mod service;

pub use service::{Authenticated, AuthService};
