//! Domain-specific error types for authentication and token management
//!
//! Every variant maps to a stable error code used in API error bodies.

use thiserror::Error;
use todo_shared::ErrorResponse;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("The Username you entered is already in use.")]
    DuplicateUsername,

    #[error("The Email you entered is already in use.")]
    DuplicateEmail,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Empty Cookie Exception")]
    ExpiredCookie,

    #[error("Invalid Cookie Exception")]
    InvalidCookie,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

impl AuthError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::DuplicateUsername => "DUPLICATE_USERNAME",
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::ExpiredCookie => "EXPIRED_COOKIE",
            AuthError::InvalidCookie => "INVALID_COOKIE",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
        }
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token subject does not match")]
    SubjectMismatch,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Signing key must be at least {min_bytes} bytes")]
    WeakSigningKey { min_bytes: usize },
}

impl TokenError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::SubjectMismatch => "SUBJECT_MISMATCH",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
            TokenError::WeakSigningKey { .. } => "WEAK_SIGNING_KEY",
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Password must be at least 8 characters and contain an uppercase letter, a lowercase letter, a digit and a special character")]
    WeakPassword,
}

impl ValidationError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
            ValidationError::TooLong { .. } => "TOO_LONG",
            ValidationError::WeakPassword => "WEAK_PASSWORD",
        }
    }
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

/// Convert ValidationError to ErrorResponse
impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let response = ErrorResponse::new(err.code(), err.to_string());
        match &err {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::TooLong { field, .. } => response.add_detail("field", field),
            ValidationError::WeakPassword => response.add_detail("field", "password"),
        }
    }
}
