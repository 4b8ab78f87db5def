//! Conversion of domain and validation errors into HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use todo_core::errors::{AuthError, DomainError, TokenError};
use todo_shared::errors::{error_codes, ErrorResponse};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::DuplicateUsername | AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::ExpiredCookie
            | AuthError::InvalidCookie => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        },
        DomainError::Token(TokenError::TokenGenerationFailed | TokenError::WeakSigningKey { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::ValidationErr(_) | DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);
    if status.is_server_error() {
        log::error!("Domain Error: {:?}", error);
    } else {
        log::debug!("Domain Error: {:?}", error);
    }

    let body = match error {
        DomainError::Auth(e) => ErrorResponse::from(e),
        DomainError::Token(e) => ErrorResponse::from(e),
        DomainError::ValidationErr(e) => ErrorResponse::from(e),
        DomainError::Validation { message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
        }
        DomainError::NotFound { resource } => {
            ErrorResponse::new(error_codes::NOT_FOUND, format!("Resource not found: {}", resource))
        }
        // Internal details stay in the log
        DomainError::Internal { .. } => {
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        }
    };

    HttpResponse::build(status).json(body)
}

/// Convert request validation failures into a 400 with per-field messages
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field.to_string(), messages);
    }

    HttpResponse::BadRequest().json(body)
}

/// 401 response for requests the JWT middleware turns away before any domain call
pub fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(error_codes::UNAUTHORIZED, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::errors::ValidationError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&AuthError::DuplicateUsername.into()), StatusCode::CONFLICT);
        assert_eq!(status_for(&AuthError::DuplicateEmail.into()), StatusCode::CONFLICT);
        assert_eq!(status_for(&AuthError::InvalidCredentials.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&AuthError::ExpiredCookie.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&AuthError::InvalidCookie.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&AuthError::UserNotFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&AuthError::InsufficientPermissions.into()), StatusCode::FORBIDDEN);
        assert_eq!(status_for(&TokenError::TokenRevoked.into()), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&TokenError::TokenGenerationFailed.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&TokenError::WeakSigningKey { min_bytes: 32 }.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_for(&ValidationError::WeakPassword.into()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&DomainError::Internal { message: "db down".to_string() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let response = handle_domain_error(DomainError::Internal {
            message: "connection refused".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], error_codes::INTERNAL_ERROR);
        assert!(!json["message"].as_str().unwrap().contains("connection refused"));
    }

    #[actix_web::test]
    async fn test_duplicate_username_body() {
        let response = handle_domain_error(AuthError::DuplicateUsername.into());
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "DUPLICATE_USERNAME");
        assert_eq!(json["message"], "The Username you entered is already in use.");
    }
}
