//! Access token repository trait defining the interface for issued JWT records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::AccessToken;
use crate::errors::DomainError;

/// Repository trait for AccessToken persistence operations
///
/// Rows are never physically deleted. Revocation flips `is_logged_out`.
///
/// # Invariant
/// At most one token per user has `is_logged_out = false`. Implementations
/// uphold it by making [`replace_for_user`](Self::replace_for_user) atomic
/// with respect to concurrent issuance for the same user.
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    /// Revoke every valid token of `token.user_id` and insert `token`, atomically
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens that were revoked
    /// * `Err(DomainError)` - Storage failure; nothing was changed
    async fn replace_for_user(&self, token: AccessToken) -> Result<usize, DomainError>;

    /// Find a token record by its JWT string
    async fn find_by_token(&self, token: &str) -> Result<Option<AccessToken>, DomainError>;

    /// All token records of a user, valid or not
    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<AccessToken>, DomainError>;

    /// Tokens of a user that are not logged out
    async fn find_all_valid_by_user(&self, user_id: Uuid) -> Result<Vec<AccessToken>, DomainError>;

    /// Mark a single token as logged out
    ///
    /// # Returns
    /// * `Ok(true)` - The token was valid and is now revoked
    async fn revoke_token(&self, token: &str) -> Result<bool, DomainError>;

    /// Mark every valid token of a user as logged out
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens newly revoked (0 when already revoked)
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;
}
