//! Authentication response value objects returned by the auth flows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status reported on every successful authorization
pub const STATUS_OK: &str = "OK";

/// Response body of a successful registration or login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorizationResponse {
    /// Identifier of the authenticated user
    pub id: Uuid,

    /// Username of the authenticated user
    pub username: String,

    /// Freshly issued access token
    pub jwt: String,

    /// Human-readable outcome
    pub message: String,

    /// Outcome status, always "OK" on success
    pub status: String,
}

impl AuthorizationResponse {
    /// Creates a successful authorization response
    pub fn ok(id: Uuid, username: impl Into<String>, jwt: String, message: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            jwt,
            message: message.into(),
            status: STATUS_OK.to_string(),
        }
    }
}

/// Response body of a successful refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshResponse {
    /// Newly issued access token
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Description of the refresh cookie to set on the response
///
/// The HTTP layer turns this into a `Set-Cookie` header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshCookie {
    /// Cookie name
    pub name: String,

    /// Raw refresh token value
    pub value: String,

    /// Path the cookie is scoped to
    pub path: String,

    /// Lifetime in seconds
    pub max_age_seconds: i64,

    /// HttpOnly flag
    pub http_only: bool,

    /// Secure flag
    pub secure: bool,
}

/// Outcome of register and login: response body plus refresh cookie
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub response: AuthorizationResponse,
    pub cookie: RefreshCookie,
}

/// Outcome of refresh: new access token plus rotated refresh cookie
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSession {
    pub response: RefreshResponse,
    pub cookie: RefreshCookie,
}
