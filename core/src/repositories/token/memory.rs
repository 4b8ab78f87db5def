//! In-memory implementation of AccessTokenRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::AccessToken;
use crate::errors::DomainError;

use super::trait_::AccessTokenRepository;

/// Access token repository backed by a process-local map
#[derive(Clone)]
pub struct InMemoryAccessTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, AccessToken>>>,
}

impl InMemoryAccessTokenRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAccessTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn revoke_valid(tokens: &mut HashMap<Uuid, AccessToken>, user_id: Uuid) -> usize {
    let mut revoked = 0;
    for token in tokens.values_mut() {
        if token.user_id == user_id && token.is_valid() {
            token.revoke();
            revoked += 1;
        }
    }
    revoked
}

#[async_trait]
impl AccessTokenRepository for InMemoryAccessTokenRepository {
    async fn replace_for_user(&self, token: AccessToken) -> Result<usize, DomainError> {
        // One write guard covers both steps
        let mut tokens = self.tokens.write().await;
        let revoked = revoke_valid(&mut tokens, token.user_id);
        tokens.insert(token.id, token);
        Ok(revoked)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<AccessToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<AccessToken>, DomainError> {
        let tokens = self.tokens.read().await;
        let mut found: Vec<AccessToken> = tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|t| t.created_at);
        Ok(found)
    }

    async fn find_all_valid_by_user(&self, user_id: Uuid) -> Result<Vec<AccessToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.user_id == user_id && t.is_valid())
            .cloned()
            .collect())
    }

    async fn revoke_token(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        match tokens.values_mut().find(|t| t.token == token && t.is_valid()) {
            Some(record) => {
                record.revoke();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(revoke_valid(&mut tokens, user_id))
    }
}
