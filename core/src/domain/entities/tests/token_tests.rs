//! Unit tests for token entities

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{
    AccessToken, Claims, RefreshToken, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};

#[test]
fn test_access_token_claims() {
    let claims = Claims::new_access_token("alice", Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES));

    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
    assert!(claims.is_for("alice"));
    assert!(!claims.is_for("bob"));
    assert!(!claims.is_expired());
}

#[test]
fn test_claims_have_unique_ids() {
    let first = Claims::new_access_token("alice", Duration::minutes(5));
    let second = Claims::new_access_token("alice", Duration::minutes(5));

    assert_ne!(first.jti, second.jti);
}

#[test]
fn test_claims_expiration() {
    let mut claims = Claims::new_access_token("alice", Duration::minutes(5));

    // Set expiration to past
    claims.exp = Utc::now().timestamp() - 1;

    assert!(claims.is_expired());
}

#[test]
fn test_access_token_revocation() {
    let mut token = AccessToken::new(Uuid::new_v4(), "jwt".to_string());
    assert!(token.is_valid());

    token.revoke();
    assert!(token.is_logged_out);
    assert!(!token.is_valid());

    // Revocation is terminal
    token.revoke();
    assert!(!token.is_valid());
}

#[test]
fn test_refresh_token_creation() {
    let user_id = Uuid::new_v4();
    let token = RefreshToken::new(user_id, "hashed_token_value".to_string());

    assert_eq!(token.user_id, user_id);
    assert!(!token.is_revoked);
    assert!(token.is_valid());

    let lifetime = token.expires_at - token.created_at;
    assert_eq!(lifetime, Duration::days(REFRESH_TOKEN_EXPIRY_DAYS));
}

#[test]
fn test_refresh_token_revocation() {
    let mut token = RefreshToken::new(Uuid::new_v4(), "hash".to_string());

    token.revoke();

    assert!(token.is_revoked);
    assert!(!token.is_valid());
}

#[test]
fn test_refresh_token_expiration() {
    let mut token = RefreshToken::new(Uuid::new_v4(), "hash".to_string());

    // Manually set expiration to past
    token.expires_at = Utc::now() - Duration::days(1);

    assert!(token.is_expired());
    assert!(!token.is_valid());
}
