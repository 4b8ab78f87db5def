//! Test doubles for the authentication service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{InMemoryRefreshTokenRepository, RefreshTokenRepository};
use crate::services::auth::Authenticator;
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};

/// Authenticator accepting a single fixed user, counting calls
pub struct FixedAuthenticator {
    pub user: User,
    pub password: String,
    pub calls: AtomicUsize,
}

impl FixedAuthenticator {
    pub fn new(user: User, password: &str) -> Self {
        Self {
            user,
            password: password.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Authenticator for FixedAuthenticator {
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if username == self.user.username && password == self.password {
            Ok(self.user.clone())
        } else {
            Err(AuthError::InvalidCredentials.into())
        }
    }
}

/// Refresh token store that pauses after every lookup
///
/// Widens the window between reading a token and redeeming it so that
/// interleavings of concurrent requests become reproducible.
pub struct SlowRefreshTokenRepository {
    pub inner: InMemoryRefreshTokenRepository,
    pub delay: Duration,
}

impl SlowRefreshTokenRepository {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryRefreshTokenRepository::new(),
            delay,
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for SlowRefreshTokenRepository {
    async fn rotate(&self, token: RefreshToken) -> Result<usize, DomainError> {
        self.inner.rotate(token).await
    }

    async fn consume(
        &self,
        token_hash: &str,
        replacement: RefreshToken,
    ) -> Result<Option<RefreshToken>, DomainError> {
        self.inner.consume(token_hash, replacement).await
    }

    async fn find_valid(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let found = self.inner.find_valid(token_hash).await;
        tokio::time::sleep(self.delay).await;
        found
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.inner.find_by_hash(token_hash).await
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        self.inner.revoke_all_for_user(user_id).await
    }
}

/// bcrypt hasher counting how often each operation runs
pub struct CountingHasher {
    inner: BcryptPasswordHasher,
    pub hashes: AtomicUsize,
    pub verifies: AtomicUsize,
}

impl CountingHasher {
    pub fn new() -> Self {
        Self {
            inner: BcryptPasswordHasher::new(4),
            hashes: AtomicUsize::new(0),
            verifies: AtomicUsize::new(0),
        }
    }
}

impl PasswordHasher for CountingHasher {
    fn hash(&self, raw: &str) -> Result<String, DomainError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        self.inner.hash(raw)
    }

    fn verify(&self, raw: &str, hash: &str) -> Result<bool, DomainError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(raw, hash)
    }
}
