//! JWT claims structure used in access, refresh, and reset tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use accesshub_entity::permission::AccessAction;
use accesshub_entity::role::PermissionGrant;
use accesshub_entity::token::TokenKind;

/// A flattened permission claim embedded in access tokens.
///
/// One entry per permission key, the union of the flags granted by the
/// user's active roles at issue time. Lets downstream services authorize
/// without a store round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Permission key.
    pub key: String,
    /// Union of the read flags for this key.
    pub read: bool,
    /// Union of the write flags for this key.
    pub write: bool,
    /// Union of the delete flags for this key.
    pub delete: bool,
}

impl AccessGrant {
    /// Check whether this grant allows the given action.
    pub fn allows(&self, action: AccessAction) -> bool {
        match action {
            AccessAction::Read => self.read,
            AccessAction::Write => self.write,
            AccessAction::Delete => self.delete,
        }
    }

    /// Fold another snapshot of the same key into this grant.
    pub fn union(&mut self, grant: &PermissionGrant) {
        self.read |= grant.read;
        self.write |= grant.write;
        self.delete |= grant.delete;
    }
}

impl From<&PermissionGrant> for AccessGrant {
    fn from(grant: &PermissionGrant) -> Self {
        Self {
            key: grant.key.clone(),
            read: grant.read,
            write: grant.write,
            delete: grant.delete,
        }
    }
}

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Email at issue time.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID, unique per issued token.
    pub jti: Uuid,
    /// Token flavor: access, refresh, or reset_password.
    pub token_type: TokenKind,
    /// Permission claims. Populated only for access tokens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grants: Vec<AccessGrant>,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Looks up the grant for a permission key, if present.
    pub fn grant_for(&self, key: &str) -> Option<&AccessGrant> {
        self.grants.iter().find(|grant| grant.key == key)
    }

    /// Checks whether the claims allow the given action on a key.
    pub fn allows(&self, key: &str, action: AccessAction) -> bool {
        self.grant_for(key).is_some_and(|grant| grant.allows(action))
    }
}
