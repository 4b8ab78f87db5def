//! Credential verification used by the login flow

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;
use crate::services::password::{hash_blocking, verify_blocking, PasswordHasher};

/// Password hashed once to give unknown usernames a verification to run
const DUMMY_PASSWORD: &str = "unknown-user-placeholder";

/// Verifies a username and password pair
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the matching user or `AuthError::InvalidCredentials`
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError>;
}

/// Authenticator checking bcrypt hashes stored in the user repository
///
/// A lookup miss still runs one hash verification, so response time does not
/// reveal whether a username exists.
pub struct PasswordAuthenticator<U: UserRepository, H: PasswordHasher> {
    user_repository: Arc<U>,
    password_hasher: Arc<H>,
    dummy_hash: OnceCell<String>,
}

impl<U: UserRepository, H: PasswordHasher> PasswordAuthenticator<U, H> {
    pub fn new(user_repository: Arc<U>, password_hasher: Arc<H>) -> Self {
        Self {
            user_repository,
            password_hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    async fn verify_dummy(&self, password: &str) -> Result<(), DomainError> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| hash_blocking(Arc::clone(&self.password_hasher), DUMMY_PASSWORD))
            .await?;
        verify_blocking(Arc::clone(&self.password_hasher), password, dummy).await?;
        Ok(())
    }
}

#[async_trait]
impl<U: UserRepository, H: PasswordHasher> Authenticator for PasswordAuthenticator<U, H> {
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let Some(user) = self.user_repository.find_by_username(username).await? else {
            self.verify_dummy(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        // Unknown user and wrong password are indistinguishable to the caller
        if !verify_blocking(Arc::clone(&self.password_hasher), password, &user.password).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }
}
