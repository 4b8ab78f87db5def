//! Refresh token service implementation

use std::sync::Arc;

use chrono::Duration;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;
use crate::repositories::RefreshTokenRepository;

use super::config::RefreshTokenServiceConfig;

/// SHA-256 hex digest of a raw refresh token value
pub fn hash_token(raw: &str) -> String {
    format!("{:x}", Sha256::digest(raw.as_bytes()))
}

/// Service issuing and looking up opaque refresh tokens
pub struct RefreshTokenService<R: RefreshTokenRepository> {
    repository: Arc<R>,
    config: RefreshTokenServiceConfig,
}

impl<R: RefreshTokenRepository> RefreshTokenService<R> {
    /// Creates a new refresh token service
    pub fn new(repository: Arc<R>, config: RefreshTokenServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Issues a new refresh token for a user and returns its raw value
    ///
    /// Every earlier refresh token of the user is revoked in the same store
    /// operation.
    pub async fn generate_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let raw = Uuid::new_v4().to_string();
        let token = RefreshToken::with_lifetime(
            user_id,
            hash_token(&raw),
            Duration::seconds(self.config.expiry_seconds),
        );

        let revoked = self.repository.rotate(token).await?;

        tracing::debug!(
            user_id = %user_id,
            revoked_tokens = revoked,
            event = "refresh_token_rotated",
            "Issued refresh token"
        );

        Ok(raw)
    }

    /// Trades a raw refresh token for a fresh one
    ///
    /// The presented token is revoked and its replacement stored in one store
    /// operation, so concurrent callers presenting the same value cannot both
    /// succeed.
    ///
    /// # Returns
    ///
    /// The owning user and the new raw token, or `None` when the presented
    /// token is unknown, expired, revoked or lost the race to another caller.
    pub async fn exchange(&self, raw: &str) -> Result<Option<(Uuid, String)>, DomainError> {
        let token_hash = hash_token(raw);
        let Some(current) = self.repository.find_valid(&token_hash).await? else {
            return Ok(None);
        };

        let next_raw = Uuid::new_v4().to_string();
        let replacement = RefreshToken::with_lifetime(
            current.user_id,
            hash_token(&next_raw),
            Duration::seconds(self.config.expiry_seconds),
        );

        match self.repository.consume(&token_hash, replacement).await? {
            Some(consumed) => {
                tracing::debug!(
                    user_id = %consumed.user_id,
                    event = "refresh_token_exchanged",
                    "Exchanged refresh token"
                );
                Ok(Some((consumed.user_id, next_raw)))
            }
            None => {
                tracing::debug!(
                    user_id = %current.user_id,
                    event = "refresh_token_exchange_lost",
                    "Refresh token was redeemed or revoked concurrently"
                );
                Ok(None)
            }
        }
    }

    /// Looks up a raw refresh token, returning it only while valid
    pub async fn find_valid(&self, raw: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.repository.find_valid(&hash_token(raw)).await
    }

    /// Whether a raw refresh token is known, unexpired and unrevoked
    pub async fn is_valid(&self, raw: &str) -> Result<bool, DomainError> {
        Ok(self.find_valid(raw).await?.is_some())
    }

    /// Revokes every refresh token of a user
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.repository.revoke_all_for_user(user_id).await
    }
}
