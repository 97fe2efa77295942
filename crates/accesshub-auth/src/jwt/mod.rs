//! JWT creation and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{AccessGrant, Claims};
pub use decoder::JwtDecoder;
pub use encoder::{JwtEncoder, TokenPair};
