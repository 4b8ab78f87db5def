use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use todo_core::services::auth::{
    check_password_strength, LoginRequest as CoreLoginRequest, RegistrationRequest,
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1 to 50 characters"))]
    pub username: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    /// At least 8 characters with upper and lower case letters, a digit and a
    /// special character
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
    pub revoked_tokens: usize,
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(dto: RegisterRequest) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
        }
    }
}

impl From<LoginRequest> for CoreLoginRequest {
    fn from(dto: LoginRequest) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
        }
    }
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    check_password_strength(password).map_err(|_| {
        let mut error = ValidationError::new("weak_password");
        error.message = Some(Cow::from(
            "Password must be at least 8 characters and contain an uppercase letter, \
             a lowercase letter, a digit and a special character",
        ));
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(register("alice", "alice@example.com", "Secret#123").validate().is_ok());
    }

    #[test]
    fn test_register_request_field_errors() {
        let errors = register("", "not-an-email", "password").validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert_eq!(fields["password"][0].code, "weak_password");
    }

    #[test]
    fn test_username_too_long() {
        let username = "a".repeat(51);
        let errors = register(&username, "alice@example.com", "Secret#123")
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let request = LoginRequest {
            username: "alice".to_string(),
            password: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
