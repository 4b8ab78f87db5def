//! Tests for the in-memory user repository

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{InMemoryUserRepository, UserRepository};

fn user(username: &str, email: &str) -> User {
    User::new(username.to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let created = repo.create(user("alice", "alice@example.com")).await.unwrap();

    let by_id = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.as_ref().map(|u| u.username.as_str()), Some("alice"));

    let by_name = repo.find_by_username("alice").await.unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(created.id));

    let by_email = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(created.id));
}

#[tokio::test]
async fn test_find_missing_user() {
    let repo = InMemoryUserRepository::new();

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("alice", "alice@example.com")).await.unwrap();

    let result = repo.create(user("alice", "other@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateUsername))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("alice", "alice@example.com")).await.unwrap();

    let result = repo.create(user("bob", "alice@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DuplicateEmail))
    ));
}
