//! Inputs of the registration and login flows

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::errors::ValidationError;

/// Special characters accepted as the required symbol in a password
pub const PASSWORD_SPECIAL_CHARS: &str = "#?!@$ %^&*-";

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum username length in characters
pub const USERNAME_MAX_LENGTH: usize = 50;

/// Credentials submitted at sign-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Credentials submitted at sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl RegistrationRequest {
    /// Checks required fields, username length, the email shape and password strength
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("username", &self.username),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                });
            }
        }

        if self.username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(ValidationError::TooLong {
                field: "username".to_string(),
                max: USERNAME_MAX_LENGTH,
            });
        }

        if !self.email.validate_email() {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
            });
        }

        check_password_strength(&self.password)
    }
}

impl LoginRequest {
    /// Checks required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "username".to_string(),
            });
        }
        if self.password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            });
        }
        Ok(())
    }
}

/// Requires at least 8 characters including an uppercase letter, a lowercase
/// letter, a digit and one of [`PASSWORD_SPECIAL_CHARS`]
pub fn check_password_strength(password: &str) -> Result<(), ValidationError> {
    let strong = password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    if strong {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> RegistrationRequest {
        RegistrationRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_password_strength() {
        assert!(check_password_strength("Secret#123").is_ok());
        assert!(check_password_strength("Abcdef1 ").is_ok());

        assert_eq!(check_password_strength("Sec#1"), Err(ValidationError::WeakPassword));
        assert_eq!(check_password_strength("secret#123"), Err(ValidationError::WeakPassword));
        assert_eq!(check_password_strength("SECRET#123"), Err(ValidationError::WeakPassword));
        assert_eq!(check_password_strength("Secret#abc"), Err(ValidationError::WeakPassword));
        assert_eq!(check_password_strength("Secret1234"), Err(ValidationError::WeakPassword));
    }

    #[test]
    fn test_registration_required_fields() {
        assert_eq!(
            request("", "a@b.com", "Secret#123").validate(),
            Err(ValidationError::RequiredField { field: "username".to_string() })
        );
        assert_eq!(
            request("alice", " ", "Secret#123").validate(),
            Err(ValidationError::RequiredField { field: "email".to_string() })
        );
    }

    #[test]
    fn test_registration_email_format() {
        assert_eq!(
            request("alice", "alice.example.com", "Secret#123").validate(),
            Err(ValidationError::InvalidFormat { field: "email".to_string() })
        );
        assert!(request("alice", "alice@example.com", "Secret#123").validate().is_ok());
    }

    #[test]
    fn test_registration_rejects_malformed_domains() {
        for email in ["<x>@-", "a@.", "a\"b@,,", "a@b@c.com", "a b@example.com"] {
            assert_eq!(
                request("alice", email, "Secret#123").validate(),
                Err(ValidationError::InvalidFormat { field: "email".to_string() }),
                "{} was accepted",
                email
            );
        }
    }

    #[test]
    fn test_registration_username_length() {
        let longest = "a".repeat(USERNAME_MAX_LENGTH);
        assert!(request(&longest, "a@example.com", "Secret#123").validate().is_ok());

        let too_long = "a".repeat(USERNAME_MAX_LENGTH + 1);
        assert_eq!(
            request(&too_long, "a@example.com", "Secret#123").validate(),
            Err(ValidationError::TooLong { field: "username".to_string(), max: 50 })
        );

        // Counted in characters, not bytes
        let multibyte = "é".repeat(USERNAME_MAX_LENGTH);
        assert!(request(&multibyte, "a@example.com", "Secret#123").validate().is_ok());
    }

    #[test]
    fn test_login_required_fields() {
        let login = LoginRequest {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert_eq!(
            login.validate(),
            Err(ValidationError::RequiredField { field: "password".to_string() })
        );
    }
}
