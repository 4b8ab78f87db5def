//! Tests for the in-memory access token repository

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::AccessToken;
use crate::repositories::token::{AccessTokenRepository, InMemoryAccessTokenRepository};

#[tokio::test]
async fn test_replace_revokes_previous_tokens() {
    let repo = InMemoryAccessTokenRepository::new();
    let user_id = Uuid::new_v4();

    let revoked = repo
        .replace_for_user(AccessToken::new(user_id, "first".to_string()))
        .await
        .unwrap();
    assert_eq!(revoked, 0);

    let revoked = repo
        .replace_for_user(AccessToken::new(user_id, "second".to_string()))
        .await
        .unwrap();
    assert_eq!(revoked, 1);

    let valid = repo.find_all_valid_by_user(user_id).await.unwrap();
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].token, "second");

    let first = repo.find_by_token("first").await.unwrap().unwrap();
    assert!(first.is_logged_out);
    assert_eq!(repo.find_all_by_user(user_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_replace_leaves_other_users_alone() {
    let repo = InMemoryAccessTokenRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.replace_for_user(AccessToken::new(alice, "alice".to_string())).await.unwrap();
    repo.replace_for_user(AccessToken::new(bob, "bob".to_string())).await.unwrap();

    assert_eq!(repo.find_all_valid_by_user(alice).await.unwrap().len(), 1);
    assert_eq!(repo.find_all_valid_by_user(bob).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_revoke_all_is_idempotent() {
    let repo = InMemoryAccessTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.replace_for_user(AccessToken::new(user_id, "jwt".to_string())).await.unwrap();

    assert_eq!(repo.revoke_all_for_user(user_id).await.unwrap(), 1);
    assert_eq!(repo.revoke_all_for_user(user_id).await.unwrap(), 0);

    let all = repo.find_all_by_user(user_id).await.unwrap();
    assert!(all.iter().all(|t| t.is_logged_out));
}

#[tokio::test]
async fn test_concurrent_replace_keeps_single_valid_token() {
    let repo = Arc::new(InMemoryAccessTokenRepository::new());
    let user_id = Uuid::new_v4();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.replace_for_user(AccessToken::new(user_id, format!("jwt-{}", i)))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut total_revoked = 0;
    for handle in handles {
        total_revoked += handle.await.unwrap();
    }

    assert_eq!(total_revoked, 15);
    assert_eq!(repo.find_all_valid_by_user(user_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_revoke_token_targets_one_record() {
    let repo = InMemoryAccessTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.replace_for_user(AccessToken::new(user_id, "current".to_string()))
        .await
        .unwrap();

    assert!(!repo.revoke_token("unknown").await.unwrap());
    assert!(repo.revoke_token("current").await.unwrap());
    assert!(!repo.revoke_token("current").await.unwrap());
    assert!(repo.find_all_valid_by_user(user_id).await.unwrap().is_empty());
}
