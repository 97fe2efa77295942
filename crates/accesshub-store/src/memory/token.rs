//! In-memory token store.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use accesshub_core::result::AppResult;
use accesshub_entity::token::{TokenKind, TokenRecord};

use crate::traits::TokenStore;

/// In-memory token store keyed by token digest.
///
/// `take_by_hash` relies on dashmap's atomic conditional remove, so two
/// callers racing on one refresh token cannot both claim it.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: DashMap<String, TokenRecord>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn insert(&self, record: TokenRecord) -> AppResult<TokenRecord> {
        self.tokens.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
        kind: TokenKind,
    ) -> AppResult<Option<TokenRecord>> {
        Ok(self
            .tokens
            .get(token_hash)
            .filter(|entry| entry.value().kind == kind && !entry.value().is_expired())
            .map(|entry| entry.value().clone()))
    }

    async fn take_by_hash(
        &self,
        token_hash: &str,
        kind: TokenKind,
    ) -> AppResult<Option<TokenRecord>> {
        Ok(self
            .tokens
            .remove_if(token_hash, |_, record| {
                record.kind == kind && !record.is_expired()
            })
            .map(|(_, record)| record))
    }

    async fn delete_for_user(&self, user_id: Uuid, kind: TokenKind) -> AppResult<u64> {
        let before = self.tokens.len();
        self.tokens
            .retain(|_, record| !(record.user_id == user_id && record.kind == kind));
        Ok((before - self.tokens.len()) as u64)
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let before = self.tokens.len();
        self.tokens.retain(|_, record| !record.is_expired());
        let purged = (before - self.tokens.len()) as u64;
        if purged > 0 {
            debug!(purged, "Purged expired token records");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(user_id: Uuid, kind: TokenKind, hash: &str, ttl_minutes: i64) -> TokenRecord {
        TokenRecord {
            id: Uuid::new_v4(),
            user_id,
            kind,
            token_hash: hash.to_string(),
            expires_at: Utc::now() + Duration::minutes(ttl_minutes),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_take_claims_record_exactly_once() {
        let store = MemoryTokenStore::new();
        let user_id = Uuid::new_v4();
        store
            .insert(record(user_id, TokenKind::Refresh, "abc", 60))
            .await
            .unwrap();

        let first = store.take_by_hash("abc", TokenKind::Refresh).await.unwrap();
        let second = store.take_by_hash("abc", TokenKind::Refresh).await.unwrap();
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_invisible() {
        let store = MemoryTokenStore::new();
        let user_id = Uuid::new_v4();
        store
            .insert(record(user_id, TokenKind::ResetPassword, "abc", 60))
            .await
            .unwrap();

        let found = store.find_by_hash("abc", TokenKind::Refresh).await.unwrap();
        assert!(found.is_none());
        // And the mismatched take must not consume the record.
        let taken = store.take_by_hash("abc", TokenKind::Refresh).await.unwrap();
        assert!(taken.is_none());
        assert!(
            store
                .find_by_hash("abc", TokenKind::ResetPassword)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_delete_for_user_only_touches_one_kind() {
        let store = MemoryTokenStore::new();
        let user_id = Uuid::new_v4();
        store
            .insert(record(user_id, TokenKind::ResetPassword, "r1", 60))
            .await
            .unwrap();
        store
            .insert(record(user_id, TokenKind::ResetPassword, "r2", 60))
            .await
            .unwrap();
        store
            .insert(record(user_id, TokenKind::Refresh, "rf", 60))
            .await
            .unwrap();

        let removed = store
            .delete_for_user(user_id, TokenKind::ResetPassword)
            .await
            .unwrap();
        assert_eq!(removed, 2);
        assert!(
            store
                .find_by_hash("rf", TokenKind::Refresh)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_expired_records_are_dead_and_purgeable() {
        let store = MemoryTokenStore::new();
        let user_id = Uuid::new_v4();
        store
            .insert(record(user_id, TokenKind::Refresh, "old", -5))
            .await
            .unwrap();

        assert!(
            store
                .find_by_hash("old", TokenKind::Refresh)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.purge_expired().await.unwrap(), 0);
    }
}
