//! Password hashing behind a trait so services stay independent of bcrypt

use std::sync::Arc;

use crate::errors::DomainError;

/// Hashes and verifies raw passwords
///
/// Implementations may block for a noticeable time. Async callers go
/// through [`hash_blocking`] and [`verify_blocking`].
pub trait PasswordHasher: Send + Sync + 'static {
    /// Produce a salted hash of `raw`
    fn hash(&self, raw: &str) -> Result<String, DomainError>;

    /// Check `raw` against a stored hash
    fn verify(&self, raw: &str, hash: &str) -> Result<bool, DomainError>;
}

/// Run [`PasswordHasher::hash`] on the blocking thread pool
pub async fn hash_blocking<H: PasswordHasher>(
    hasher: Arc<H>,
    raw: &str,
) -> Result<String, DomainError> {
    let raw = raw.to_owned();
    tokio::task::spawn_blocking(move || hasher.hash(&raw))
        .await
        .map_err(join_error)?
}

/// Run [`PasswordHasher::verify`] on the blocking thread pool
pub async fn verify_blocking<H: PasswordHasher>(
    hasher: Arc<H>,
    raw: &str,
    hash: &str,
) -> Result<bool, DomainError> {
    let (raw, hash) = (raw.to_owned(), hash.to_owned());
    tokio::task::spawn_blocking(move || hasher.verify(&raw, &hash))
        .await
        .map_err(join_error)?
}

fn join_error(e: tokio::task::JoinError) -> DomainError {
    tracing::error!(panicked = e.is_panic(), event = "password_task_failed", "Password task did not finish");
    DomainError::Internal {
        message: format!("Password hashing task failed: {}", e),
    }
}

/// bcrypt-backed password hasher
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, raw: &str) -> Result<String, DomainError> {
        bcrypt::hash(raw, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify(&self, raw: &str, hash: &str) -> Result<bool, DomainError> {
        // A malformed stored hash never matches
        Ok(bcrypt::verify(raw, hash).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("Secret#123").unwrap();

        assert_ne!(hash, "Secret#123");
        assert!(hasher.verify("Secret#123", &hash).unwrap());
        assert!(!hasher.verify("secret#123", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = BcryptPasswordHasher::new(4);
        let first = hasher.hash("Secret#123").unwrap();
        let second = hasher.hash("Secret#123").unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hasher = Arc::new(BcryptPasswordHasher::new(4));
        let hash = hash_blocking(Arc::clone(&hasher), "Secret#123").await.unwrap();

        assert!(verify_blocking(Arc::clone(&hasher), "Secret#123", &hash).await.unwrap());
        assert!(!verify_blocking(hasher, "Wrong#123", &hash).await.unwrap());
    }

    #[test]
    fn test_verify_against_malformed_hash() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(!hasher.verify("Secret#123", "not-a-bcrypt-hash").unwrap());
    }
}
