//! In-memory implementation of PasswordResetRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::password_reset::PasswordResetToken;
use crate::errors::DomainError;

use super::trait_::PasswordResetRepository;

/// Mock password reset repository for testing
pub struct MockPasswordResetRepository {
    tokens: Arc<RwLock<HashMap<u64, PasswordResetToken>>>,
    next_id: AtomicU64,
}

impl MockPasswordResetRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored tokens (test assertions)
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Whether the store is empty (test assertions)
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

impl Default for MockPasswordResetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordResetRepository for MockPasswordResetRepository {
    async fn insert(
        &self,
        mut token: PasswordResetToken,
    ) -> Result<PasswordResetToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        token.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn mark_used(&self, id: u64) -> Result<(), DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.get_mut(&id) {
            Some(token) => {
                token.used = true;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "PasswordResetToken".to_string(),
            }),
        }
    }

    async fn delete_for_user(&self, user_id: u64) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();
        let before = tokens.len();
        tokens.retain(|_, t| t.expires_at >= now);
        Ok((before - tokens.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MockPasswordResetRepository::new();
        let token = PasswordResetToken::new(1, "aa".repeat(32), 1);

        let stored = repo.insert(token).await.unwrap();
        assert!(stored.id > 0);

        let found = repo.find_by_token(&stored.token).await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn test_delete_for_user_only_touches_that_user() {
        let repo = MockPasswordResetRepository::new();
        repo.insert(PasswordResetToken::new(1, "aa".repeat(32), 1))
            .await
            .unwrap();
        repo.insert(PasswordResetToken::new(2, "bb".repeat(32), 1))
            .await
            .unwrap();

        let removed = repo.delete_for_user(1).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_expired() {
        let repo = MockPasswordResetRepository::new();
        let mut expired = PasswordResetToken::new(1, "aa".repeat(32), 1);
        expired.expires_at = Utc::now() - Duration::hours(2);
        repo.insert(expired).await.unwrap();
        repo.insert(PasswordResetToken::new(2, "bb".repeat(32), 1))
            .await
            .unwrap();

        let removed = repo.delete_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(repo.len().await, 1);
    }
}
