//! Tests for the in-memory refresh token repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::repositories::refresh_token::{InMemoryRefreshTokenRepository, RefreshTokenRepository};

#[tokio::test]
async fn test_rotate_revokes_earlier_tokens() {
    let repo = InMemoryRefreshTokenRepository::new();
    let user_id = Uuid::new_v4();

    assert_eq!(repo.rotate(RefreshToken::new(user_id, "h1".to_string())).await.unwrap(), 0);
    assert_eq!(repo.rotate(RefreshToken::new(user_id, "h2".to_string())).await.unwrap(), 1);

    assert!(repo.find_valid("h1").await.unwrap().is_none());
    assert!(repo.find_by_hash("h1").await.unwrap().unwrap().is_revoked);
    assert!(repo.find_valid("h2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_find_valid_skips_expired() {
    let repo = InMemoryRefreshTokenRepository::new();
    let mut token = RefreshToken::new(Uuid::new_v4(), "expired".to_string());
    token.expires_at = Utc::now() - Duration::minutes(1);
    repo.put(token).await;

    assert!(repo.find_valid("expired").await.unwrap().is_none());
    assert!(repo.find_by_hash("expired").await.unwrap().is_some());
}

#[tokio::test]
async fn test_find_valid_unknown_hash() {
    let repo = InMemoryRefreshTokenRepository::new();
    assert!(repo.find_valid("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_revoke_all_for_user() {
    let repo = InMemoryRefreshTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.rotate(RefreshToken::new(user_id, "h1".to_string())).await.unwrap();

    assert_eq!(repo.revoke_all_for_user(user_id).await.unwrap(), 1);
    assert_eq!(repo.revoke_all_for_user(user_id).await.unwrap(), 0);
    assert!(repo.find_valid("h1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_consume_redeems_once() {
    let repo = InMemoryRefreshTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.rotate(RefreshToken::new(user_id, "h1".to_string())).await.unwrap();

    let consumed = repo
        .consume("h1", RefreshToken::new(user_id, "h2".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(consumed.user_id, user_id);
    assert!(consumed.is_revoked);
    assert!(repo.find_valid("h2").await.unwrap().is_some());

    // The same digest cannot be redeemed twice
    let second = repo
        .consume("h1", RefreshToken::new(user_id, "h3".to_string()))
        .await
        .unwrap();
    assert!(second.is_none());
    assert!(repo.find_by_hash("h3").await.unwrap().is_none());
    assert!(repo.find_valid("h2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_consume_rejects_revoked_expired_and_foreign() {
    let repo = InMemoryRefreshTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.rotate(RefreshToken::new(user_id, "revoked".to_string())).await.unwrap();
    repo.revoke_all_for_user(user_id).await.unwrap();
    let mut expired = RefreshToken::new(user_id, "expired".to_string());
    expired.expires_at = Utc::now() - Duration::minutes(1);
    repo.put(expired).await;
    repo.put(RefreshToken::new(user_id, "owned".to_string())).await;

    for hash in ["revoked", "expired", "missing"] {
        let replacement = RefreshToken::new(user_id, format!("{}-next", hash));
        assert!(repo.consume(hash, replacement).await.unwrap().is_none());
    }

    let foreign = RefreshToken::new(Uuid::new_v4(), "foreign-next".to_string());
    assert!(repo.consume("owned", foreign).await.unwrap().is_none());
    assert!(repo.find_valid("owned").await.unwrap().is_some());
}
