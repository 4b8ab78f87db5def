//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (5 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 5;

/// Refresh token expiration time (14 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 14;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `username` - The subject the token is bound to
    /// * `lifetime` - How long the token stays valid
    pub fn new_access_token(username: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: username.into(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks whether the token was issued for `username`
    pub fn is_for(&self, username: &str) -> bool {
        self.sub == username
    }
}

/// Issued access token as recorded in the token store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Unique identifier for the token row
    pub id: Uuid,

    /// The signed JWT string
    pub token: String,

    /// User this token was issued to
    pub user_id: Uuid,

    /// Whether the token has been revoked by logout or re-issuance
    pub is_logged_out: bool,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a new, valid access token record
    pub fn new(user_id: Uuid, token: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            token,
            user_id,
            is_logged_out: false,
            created_at: Utc::now(),
        }
    }

    /// Marks the token as logged out. Revocation is terminal.
    pub fn revoke(&mut self) {
        self.is_logged_out = true;
    }

    /// Checks if the token is still usable
    pub fn is_valid(&self) -> bool {
        !self.is_logged_out
    }
}

/// Refresh token entity stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// SHA-256 hex digest of the raw token value
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub is_revoked: bool,
}

impl RefreshToken {
    /// Creates a new refresh token with the default lifetime
    pub fn new(user_id: Uuid, token_hash: String) -> Self {
        Self::with_lifetime(user_id, token_hash, Duration::days(REFRESH_TOKEN_EXPIRY_DAYS))
    }

    /// Creates a new refresh token expiring after `lifetime`
    pub fn with_lifetime(user_id: Uuid, token_hash: String, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + lifetime,
            is_revoked: false,
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the refresh token is valid
    ///
    /// A token is valid if it hasn't expired and hasn't been revoked
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}
