//! Refresh token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// # Security Considerations
/// - Only SHA-256 digests are stored, never raw token values
/// - Revoked tokens are immediately invalidated
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Revoke every refresh token of `token.user_id` and insert `token`, atomically
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of earlier tokens that were revoked
    async fn rotate(&self, token: RefreshToken) -> Result<usize, DomainError>;

    /// Redeem a refresh token, atomically
    ///
    /// When `token_hash` is valid and owned by `replacement.user_id`, every
    /// refresh token of that user is revoked and `replacement` is inserted.
    /// Of two callers presenting the same token at most one succeeds.
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - The redeemed token, now revoked
    /// * `Ok(None)` - Unknown, expired, revoked or foreign token; nothing changed
    async fn consume(
        &self,
        token_hash: &str,
        replacement: RefreshToken,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Find a refresh token by digest, only if it is neither revoked nor expired
    ///
    /// Lookup and validity check form a single query.
    async fn find_valid(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find a refresh token by digest regardless of state
    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke every refresh token of a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens newly revoked
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;
}
