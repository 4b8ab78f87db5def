//! Unit tests for domain error types

use todo_shared::ErrorResponse;

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_auth_error_messages() {
    assert_eq!(
        AuthError::DuplicateUsername.to_string(),
        "The Username you entered is already in use."
    );
    assert_eq!(
        AuthError::DuplicateEmail.to_string(),
        "The Email you entered is already in use."
    );
    assert_eq!(AuthError::ExpiredCookie.to_string(), "Empty Cookie Exception");
    assert_eq!(AuthError::InvalidCookie.to_string(), "Invalid Cookie Exception");
}

#[test]
fn test_auth_error_conversion() {
    let response: ErrorResponse = AuthError::InvalidCredentials.into();
    assert_eq!(response.error, "INVALID_CREDENTIALS");
    assert_eq!(response.message, "Invalid username or password");
    assert!(response.details.is_none());
}

#[test]
fn test_token_error_conversion() {
    let response: ErrorResponse = TokenError::TokenRevoked.into();
    assert_eq!(response.error, "TOKEN_REVOKED");
    assert!(response.message.contains("revoked"));
}

#[test]
fn test_validation_error_with_fields() {
    let error = ValidationError::RequiredField {
        field: "username".to_string(),
    };
    assert!(error.to_string().contains("username"));

    let response: ErrorResponse = error.into();
    assert_eq!(response.error, "REQUIRED_FIELD");
    assert_eq!(response.details.unwrap()["field"], "username");
}

#[test]
fn test_domain_error_is_transparent() {
    let error: DomainError = AuthError::UserNotFound.into();
    assert_eq!(error.to_string(), "User not found");
    assert!(matches!(error, DomainError::Auth(AuthError::UserNotFound)));

    let error: DomainError = TokenError::TokenExpired.into();
    assert!(matches!(error, DomainError::Token(TokenError::TokenExpired)));
}

#[test]
fn test_too_long_and_weak_key_codes() {
    let response: ErrorResponse = ValidationError::TooLong {
        field: "username".to_string(),
        max: 50,
    }
    .into();
    assert_eq!(response.error, "TOO_LONG");
    assert_eq!(response.message, "username must be at most 50 characters");
    assert_eq!(response.details.unwrap()["field"], "username");

    assert_eq!(TokenError::WeakSigningKey { min_bytes: 32 }.code(), "WEAK_SIGNING_KEY");
}
