//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use todo_core::domain::entities::user::User;
use todo_core::errors::{AuthError, DomainError};
use todo_core::repositories::UserRepository;

use super::{db_error, parse_uuid};

const USER_COLUMNS: &str = "id, username, email, password, created_at, updated_at";

/// MySQL implementation of UserRepository
///
/// Uniqueness relies on the `uk_users_username` and `uk_users_email` indexes.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(db_error("Failed to get id"))?;

        Ok(User {
            id: parse_uuid(&id, "users.id")?,
            username: row.try_get("username").map_err(db_error("Failed to get username"))?,
            email: row.try_get("email").map_err(db_error("Failed to get email"))?,
            password: row.try_get("password").map_err(db_error("Failed to get password"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(db_error("Failed to get created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(db_error("Failed to get updated_at"))?,
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, column);

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

/// Maps a unique index violation to the matching duplicate error
fn duplicate_error(error: &sqlx::Error) -> Option<AuthError> {
    let database_error = match error {
        sqlx::Error::Database(database_error) if database_error.is_unique_violation() => database_error,
        _ => return None,
    };

    let message = database_error.message();
    if message.contains("uk_users_username") {
        Some(AuthError::DuplicateUsername)
    } else if message.contains("uk_users_email") {
        Some(AuthError::DuplicateEmail)
    } else {
        None
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", &id.to_string()).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, username, email, password, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) => match duplicate_error(&e) {
                Some(duplicate) => Err(duplicate.into()),
                None => Err(db_error("Failed to create user")(e)),
            },
        }
    }
}
