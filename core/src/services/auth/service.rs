//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::{
    AuthSession, AuthorizationResponse, RefreshResponse, RefreshSession,
};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{AccessTokenRepository, RefreshTokenRepository, UserRepository};
use crate::services::password::{hash_blocking, PasswordHasher};
use crate::services::refresh::RefreshTokenService;
use crate::services::token::TokenService;

use super::authenticator::{Authenticator, PasswordAuthenticator};
use super::config::AuthServiceConfig;
use super::cookie::CookiePolicy;
use super::requests::{LoginRequest, RegistrationRequest};

/// Message returned on successful registration
pub const REGISTRATION_MESSAGE: &str = "Registration Successful";

/// Message returned on successful login
pub const LOGIN_MESSAGE: &str = "Login successful";

/// Authentication service orchestrating the account flows
pub struct AuthService<U, T, R, H, A = PasswordAuthenticator<U, H>>
where
    U: UserRepository,
    T: AccessTokenRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
    A: Authenticator,
{
    /// User repository for credential persistence
    user_repository: Arc<U>,
    /// Hasher for new passwords
    password_hasher: Arc<H>,
    /// Credential verifier used at login
    authenticator: Arc<A>,
    /// Access token issuer
    token_service: Arc<TokenService<T>>,
    /// Refresh token issuer
    refresh_service: Arc<RefreshTokenService<R>>,
    /// Refresh cookie policy
    cookie_policy: CookiePolicy,
}

impl<U, T, R, H> AuthService<U, T, R, H>
where
    U: UserRepository,
    T: AccessTokenRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
{
    /// Create a new authentication service verifying passwords against the user repository
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `password_hasher` - Hasher for stored passwords
    /// * `token_service` - Service for access token management
    /// * `refresh_service` - Service for refresh token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<H>,
        token_service: Arc<TokenService<T>>,
        refresh_service: Arc<RefreshTokenService<R>>,
        config: AuthServiceConfig,
    ) -> Self {
        let authenticator = Arc::new(PasswordAuthenticator::new(
            Arc::clone(&user_repository),
            Arc::clone(&password_hasher),
        ));

        Self::with_authenticator(
            user_repository,
            password_hasher,
            authenticator,
            token_service,
            refresh_service,
            config,
        )
    }
}

impl<U, T, R, H, A> AuthService<U, T, R, H, A>
where
    U: UserRepository,
    T: AccessTokenRepository,
    R: RefreshTokenRepository,
    H: PasswordHasher,
    A: Authenticator,
{
    /// Create a new authentication service with an external credential verifier
    pub fn with_authenticator(
        user_repository: Arc<U>,
        password_hasher: Arc<H>,
        authenticator: Arc<A>,
        token_service: Arc<TokenService<T>>,
        refresh_service: Arc<RefreshTokenService<R>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            authenticator,
            token_service,
            refresh_service,
            cookie_policy: CookiePolicy::new(config.cookie),
        }
    }

    /// Access token issuer shared with the request middleware
    pub fn token_service(&self) -> Arc<TokenService<T>> {
        Arc::clone(&self.token_service)
    }

    /// Refresh cookie policy
    pub fn cookie_policy(&self) -> &CookiePolicy {
        &self.cookie_policy
    }

    /// Register a new user and start a session
    ///
    /// # Errors
    ///
    /// * `AuthError::DuplicateUsername` - Username already taken
    /// * `AuthError::DuplicateEmail` - Email already taken
    /// * `ValidationError` - Missing field, malformed email or weak password
    pub async fn register(&self, request: RegistrationRequest) -> DomainResult<AuthSession> {
        request.validate()?;

        if self
            .user_repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            tracing::info!(
                username = %request.username,
                event = "registration_rejected",
                "Username already in use"
            );
            return Err(AuthError::DuplicateUsername.into());
        }

        if self
            .user_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            tracing::info!(
                username = %request.username,
                event = "registration_rejected",
                "Email already in use"
            );
            return Err(AuthError::DuplicateEmail.into());
        }

        let password_hash =
            hash_blocking(Arc::clone(&self.password_hasher), &request.password).await?;
        // The unique indexes still decide a racing registration
        let user = self
            .user_repository
            .create(User::new(request.username, request.email, password_hash))
            .await?;

        tracing::info!(
            user_id = %user.id,
            event = "user_registered",
            "Registered new user"
        );

        self.start_session(user, REGISTRATION_MESSAGE).await
    }

    /// Log in with username and password
    ///
    /// Every earlier access token of the user is revoked before the new one
    /// becomes valid.
    pub async fn authenticate(&self, request: LoginRequest) -> DomainResult<AuthSession> {
        request.validate()?;

        let user = match self
            .authenticator
            .authenticate(&request.username, &request.password)
            .await
        {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(
                    username = %request.username,
                    event = "login_failed",
                    "Login rejected"
                );
                return Err(e);
            }
        };

        tracing::info!(
            user_id = %user.id,
            event = "user_logged_in",
            "User logged in"
        );

        self.start_session(user, LOGIN_MESSAGE).await
    }

    /// Log a user out everywhere
    ///
    /// Marks every access token of the user as logged out and revokes the
    /// refresh tokens. Calling it again changes nothing.
    ///
    /// # Returns
    ///
    /// Number of access tokens newly revoked
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<usize> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Refresh tokens go first so a racing refresh either fails to redeem
        // or sees its replacement revoked
        let revoked_refresh = self.refresh_service.revoke_all(user.id).await?;
        let revoked = self.token_service.revoke_all(user.id).await?;

        tracing::info!(
            user_id = %user.id,
            revoked_tokens = revoked,
            revoked_refresh_tokens = revoked_refresh,
            event = "user_logged_out",
            "User logged out"
        );

        Ok(revoked)
    }

    /// Issue a new access token from the refresh cookie
    ///
    /// # Arguments
    ///
    /// * `cookie_header` - Raw `Cookie` request header, if any
    ///
    /// # Errors
    ///
    /// * `AuthError::ExpiredCookie` - Header missing or without the refresh cookie
    /// * `AuthError::InvalidCookie` - Unknown, expired or revoked refresh token,
    ///   or one already redeemed by a concurrent refresh
    /// * `AuthError::UserNotFound` - Owner of the refresh token is gone
    pub async fn refresh(&self, cookie_header: Option<&str>) -> DomainResult<RefreshSession> {
        let raw = self.cookie_policy.extract(cookie_header)?;

        let (user_id, new_refresh) = self
            .refresh_service
            .exchange(raw)
            .await?
            .ok_or(AuthError::InvalidCookie)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let (access_token, _) = self.token_service.issue(&user).await?;

        // A logout or login between the exchange and the issue revoked the new
        // refresh token; the access token must not outlive it
        if !self.refresh_service.is_valid(&new_refresh).await? {
            self.token_service.revoke(&access_token).await?;
            tracing::info!(
                user_id = %user.id,
                event = "refresh_superseded",
                "Refresh lost a race with logout or login"
            );
            return Err(AuthError::InvalidCookie.into());
        }

        tracing::info!(
            user_id = %user.id,
            event = "access_token_refreshed",
            "Refreshed access token"
        );

        Ok(RefreshSession {
            response: RefreshResponse { access_token },
            cookie: self.cookie_policy.build(new_refresh),
        })
    }

    async fn start_session(&self, user: User, message: &str) -> DomainResult<AuthSession> {
        let refresh_token = self.refresh_service.generate_refresh_token(user.id).await?;
        let (jwt, _) = self.token_service.issue(&user).await?;

        Ok(AuthSession {
            response: AuthorizationResponse::ok(user.id, user.username, jwt, message),
            cookie: self.cookie_policy.build(refresh_token),
        })
    }
}
