//! Token type tags.

use serde::{Deserialize, Serialize};

/// Distinguishes the three token flavors carried in JWT claims.
///
/// Access tokens are stateless; refresh and reset-password tokens are also
/// persisted server-side so they can be revoked and enforced single-use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new token pairs.
    Refresh,
    /// Single-use token authorizing one password change.
    ResetPassword,
}

impl TokenKind {
    /// Whether tokens of this kind are tracked in the token store.
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Refresh | Self::ResetPassword)
    }

    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
            Self::ResetPassword => "reset_password",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
