//! Token issuance, verification, and single-use enforcement.
//!
//! Access tokens are stateless. Refresh and reset-password tokens are
//! additionally tracked in the token store (as SHA-256 digests, never raw)
//! so they can be revoked and enforced single-use.

use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use accesshub_core::config::auth::AuthConfig;
use accesshub_core::error::AppError;
use accesshub_entity::token::{TokenKind, TokenRecord};
use accesshub_entity::user::User;
use accesshub_store::traits::TokenStore;

use crate::jwt::claims::{AccessGrant, Claims};
use crate::jwt::decoder::JwtDecoder;
use crate::jwt::encoder::{JwtEncoder, TokenPair};

/// Computes the hex-encoded SHA-256 digest of a raw token value.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Result of a successful token verification.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    /// The decoded, validated claims.
    pub claims: Claims,
    /// The persisted record, present for refresh and reset tokens.
    pub record: Option<TokenRecord>,
}

/// Mints, validates, and revokes tokens.
#[derive(Clone)]
pub struct TokenService {
    /// JWT encoder for token generation.
    encoder: JwtEncoder,
    /// JWT decoder for token validation.
    decoder: JwtDecoder,
    /// Persistence for refresh and reset records.
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service.
    pub fn new(config: &AuthConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            tokens,
        }
    }

    /// Issues an access + refresh pair and persists the refresh record.
    pub async fn issue_auth_tokens(
        &self,
        user: &User,
        grants: Vec<AccessGrant>,
    ) -> Result<TokenPair, AppError> {
        let pair = self.encoder.generate_token_pair(user, grants)?;

        self.tokens
            .insert(TokenRecord {
                id: Uuid::new_v4(),
                user_id: user.id,
                kind: TokenKind::Refresh,
                token_hash: sha256_hex(&pair.refresh_token),
                expires_at: pair.refresh_expires_at,
                created_at: Utc::now(),
            })
            .await?;

        Ok(pair)
    }

    /// Issues a persisted reset-password token and returns the raw value.
    ///
    /// Outstanding reset tokens stay valid until one of them is consumed.
    pub async fn issue_reset_token(&self, user: &User) -> Result<String, AppError> {
        let (token, expires_at) = self.encoder.generate_reset_token(user)?;

        self.tokens
            .insert(TokenRecord {
                id: Uuid::new_v4(),
                user_id: user.id,
                kind: TokenKind::ResetPassword,
                token_hash: sha256_hex(&token),
                expires_at,
                created_at: Utc::now(),
            })
            .await?;

        Ok(token)
    }

    /// Validates a raw token of the expected kind.
    ///
    /// Signature, expiry, and kind are always checked. Persisted kinds must
    /// additionally have a live store record; a missing record means the
    /// token was already consumed or revoked.
    pub async fn verify(&self, raw: &str, kind: TokenKind) -> Result<VerifiedToken, AppError> {
        let claims = self.decoder.decode(raw, kind)?;

        let record = if kind.is_persisted() {
            let record = self
                .tokens
                .find_by_hash(&sha256_hex(raw), kind)
                .await?
                .ok_or_else(|| AppError::unauthorized("Token has been revoked"))?;
            Some(record)
        } else {
            None
        };

        Ok(VerifiedToken { claims, record })
    }

    /// Atomically claims a persisted record, enforcing single use.
    ///
    /// Exactly one of any concurrent callers gets the record back; the rest
    /// fail with an authentication error.
    pub async fn claim(&self, record: &TokenRecord) -> Result<TokenRecord, AppError> {
        self.tokens
            .take_by_hash(&record.token_hash, record.kind)
            .await?
            .ok_or_else(|| AppError::unauthorized("Token has been revoked"))
    }

    /// Deletes every token of the given kind for a user.
    pub async fn revoke_all(&self, user_id: Uuid, kind: TokenKind) -> Result<u64, AppError> {
        let revoked = self.tokens.delete_for_user(user_id, kind).await?;
        if revoked > 0 {
            debug!(%user_id, %kind, revoked, "Revoked tokens");
        }
        Ok(revoked)
    }

    /// Sweeps expired records from the token store.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        self.tokens.purge_expired().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesshub_core::error::ErrorKind;
    use accesshub_store::memory::MemoryTokenStore;

    fn service() -> TokenService {
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        };
        TokenService::new(&config, Arc::new(MemoryTokenStore::new()))
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            given_name: "Test".to_string(),
            surname: None,
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            phone_number: None,
            job_title: None,
            office_location: None,
            roles: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_refresh_token_verifies_then_claims_once() {
        let service = service();
        let user = user();
        let pair = service.issue_auth_tokens(&user, vec![]).await.unwrap();

        let verified = service
            .verify(&pair.refresh_token, TokenKind::Refresh)
            .await
            .unwrap();
        let record = verified.record.unwrap();

        service.claim(&record).await.unwrap();
        let err = service.claim(&record).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_access_token_is_stateless() {
        let service = service();
        let pair = service.issue_auth_tokens(&user(), vec![]).await.unwrap();

        let verified = service
            .verify(&pair.access_token, TokenKind::Access)
            .await
            .unwrap();
        assert!(verified.record.is_none());
    }

    #[tokio::test]
    async fn test_revoke_all_kills_outstanding_reset_tokens() {
        let service = service();
        let user = user();
        let first = service.issue_reset_token(&user).await.unwrap();
        let second = service.issue_reset_token(&user).await.unwrap();

        assert_eq!(
            service
                .revoke_all(user.id, TokenKind::ResetPassword)
                .await
                .unwrap(),
            2
        );

        for raw in [first, second] {
            let err = service
                .verify(&raw, TokenKind::ResetPassword)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Authentication);
        }
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_kind() {
        let service = service();
        let pair = service.issue_auth_tokens(&user(), vec![]).await.unwrap();

        let err = service
            .verify(&pair.access_token, TokenKind::Refresh)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
