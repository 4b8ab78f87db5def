//! In-memory implementation of RefreshTokenRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::trait_::RefreshTokenRepository;

/// Refresh token repository keyed by token digest
#[derive(Clone)]
pub struct InMemoryRefreshTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl InMemoryRefreshTokenRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Overwrite a stored token, used to simulate expiry
    pub async fn put(&self, token: RefreshToken) {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token_hash.clone(), token);
    }
}

impl Default for InMemoryRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn revoke_active(tokens: &mut HashMap<String, RefreshToken>, user_id: Uuid) -> usize {
    let mut revoked = 0;
    for token in tokens.values_mut() {
        if token.user_id == user_id && !token.is_revoked {
            token.revoke();
            revoked += 1;
        }
    }
    revoked
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn rotate(&self, token: RefreshToken) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let revoked = revoke_active(&mut tokens, token.user_id);
        tokens.insert(token.token_hash.clone(), token);
        Ok(revoked)
    }

    async fn consume(
        &self,
        token_hash: &str,
        replacement: RefreshToken,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let mut tokens = self.tokens.write().await;
        let redeemable = tokens
            .get(token_hash)
            .is_some_and(|t| t.is_valid() && t.user_id == replacement.user_id);
        if !redeemable {
            return Ok(None);
        }

        revoke_active(&mut tokens, replacement.user_id);
        let consumed = tokens.get(token_hash).cloned();
        tokens.insert(replacement.token_hash.clone(), replacement);
        Ok(consumed)
    }

    async fn find_valid(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).filter(|t| t.is_valid()).cloned())
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(revoke_active(&mut tokens, user_id))
    }
}
