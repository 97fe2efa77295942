//! Persisted token record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kind::TokenKind;

/// A server-tracked refresh or reset-password token.
///
/// Only a SHA-256 digest of the raw JWT is stored; the raw value exists
/// solely in the response handed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The user this token belongs to.
    pub user_id: Uuid,
    /// Token flavor. Always a persisted kind.
    pub kind: TokenKind,
    /// Hex-encoded SHA-256 digest of the raw token value.
    pub token_hash: String,
    /// Wall-clock expiry. Expired records are ignored by lookups and swept
    /// by `purge_expired`.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Check whether this token has passed its expiry timestamp.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
