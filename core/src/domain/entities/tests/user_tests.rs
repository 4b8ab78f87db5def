//! Unit tests for the user entity

use crate::domain::entities::user::User;

#[test]
fn test_new_user_creation() {
    let user = User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        "$2b$10$hash".to_string(),
    );

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn test_user_serialization_hides_password() {
    let user = User::new(
        "alice".to_string(),
        "alice@example.com".to_string(),
        "$2b$10$hash".to_string(),
    );

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["username"], "alice");
    assert!(json.get("password").is_none());
}
