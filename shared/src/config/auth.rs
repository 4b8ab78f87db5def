//! Authentication configuration: JWT signing and the refresh token cookie

use base64::alphabet;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Base64url form of "development-secret-please-change-in-production"
const DEFAULT_JWT_SECRET: &str = "ZGV2ZWxvcG1lbnQtc2VjcmV0LXBsZWFzZS1jaGFuZ2UtaW4tcHJvZHVjdGlvbg";

/// Shortest decoded HMAC key accepted for signing (256 bits)
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

/// Base64url engine accepting both padded and unpadded input
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Raw key bytes of a configured signing secret
///
/// The secret is decoded as base64url. A secret that is not valid base64url
/// is used as-is.
pub fn decode_signing_secret(secret: &str) -> Vec<u8> {
    URL_SAFE_LENIENT
        .decode(secret.as_bytes())
        .unwrap_or_else(|_| secret.as_bytes().to_vec())
}

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Base64url encoded signing secret
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry: 300,       // 5 minutes
            refresh_token_expiry: 1209600,  // 14 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Decoded signing key
    pub fn signing_key(&self) -> Vec<u8> {
        decode_signing_secret(&self.secret)
    }

    /// Whether the decoded key is long enough to sign with
    pub fn has_sufficient_key_length(&self) -> bool {
        self.signing_key().len() >= MIN_SIGNING_KEY_BYTES
    }
}

/// Refresh token cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Path the cookie is scoped to
    pub path: String,

    /// Cookie lifetime in seconds
    pub max_age_seconds: i64,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,

    /// Secure flag (HTTPS only)
    #[serde(default)]
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("auth_token"),
            path: String::from("/todo/app"),
            max_age_seconds: 60 * 60 * 24 * 14,
            http_only: default_http_only(),
            secure: false,
        }
    }
}

impl CookieConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: std::env::var("AUTH_COOKIE_NAME").unwrap_or(defaults.name),
            path: std::env::var("AUTH_COOKIE_PATH").unwrap_or(defaults.path),
            max_age_seconds: std::env::var("AUTH_COOKIE_MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_age_seconds),
            http_only: defaults.http_only,
            secure: std::env::var("AUTH_COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.secure),
        }
    }

    /// The `name=` prefix expected at the start of the cookie header
    pub fn header_prefix(&self) -> String {
        format!("{}=", self.name)
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "1209600".to_string())
            .parse()
            .unwrap_or(1209600);
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bcrypt_cost);

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                access_token_expiry,
                refresh_token_expiry,
            },
            cookie: CookieConfig::from_env(),
            bcrypt_cost,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookie: CookieConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_http_only() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    10
}
