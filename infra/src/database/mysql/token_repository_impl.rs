//! MySQL implementation of the AccessTokenRepository trait.
//!
//! Issued JWTs are stored verbatim in the `tokens` table and revoked by
//! flipping `is_logged_out`. Rows are never deleted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use todo_core::domain::entities::token::AccessToken;
use todo_core::errors::DomainError;
use todo_core::repositories::AccessTokenRepository;

use super::{db_error, parse_uuid};

const TOKEN_COLUMNS: &str = "id, token, user_id, is_logged_out, created_at";

/// MySQL implementation of AccessTokenRepository
pub struct MySqlAccessTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccessTokenRepository {
    /// Create a new MySQL access token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to AccessToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<AccessToken, DomainError> {
        let id: String = row.try_get("id").map_err(db_error("Failed to get id"))?;
        let user_id: String = row.try_get("user_id").map_err(db_error("Failed to get user_id"))?;

        Ok(AccessToken {
            id: parse_uuid(&id, "tokens.id")?,
            token: row.try_get("token").map_err(db_error("Failed to get token"))?,
            user_id: parse_uuid(&user_id, "tokens.user_id")?,
            is_logged_out: row
                .try_get("is_logged_out")
                .map_err(db_error("Failed to get is_logged_out"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(db_error("Failed to get created_at"))?,
        })
    }

    async fn find_for_user(&self, user_id: Uuid, only_valid: bool) -> Result<Vec<AccessToken>, DomainError> {
        let filter = if only_valid { " AND is_logged_out = FALSE" } else { "" };
        let query = format!(
            "SELECT {} FROM tokens WHERE user_id = ?{} ORDER BY created_at",
            TOKEN_COLUMNS, filter
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list tokens"))?;

        rows.iter().map(Self::row_to_token).collect()
    }
}

#[async_trait]
impl AccessTokenRepository for MySqlAccessTokenRepository {
    async fn replace_for_user(&self, token: AccessToken) -> Result<usize, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Serializes concurrent issuance for the same user
        sqlx::query("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(token.user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock user row"))?;

        let revoked = sqlx::query(
            "UPDATE tokens SET is_logged_out = TRUE WHERE user_id = ? AND is_logged_out = FALSE",
        )
        .bind(token.user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke tokens"))?
        .rows_affected();

        sqlx::query(
            "INSERT INTO tokens (id, token, user_id, is_logged_out, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(token.id.to_string())
        .bind(&token.token)
        .bind(token.user_id.to_string())
        .bind(token.is_logged_out)
        .bind(token.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to save token"))?;

        tx.commit().await.map_err(db_error("Failed to commit token replacement"))?;

        Ok(revoked as usize)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<AccessToken>, DomainError> {
        let query = format!("SELECT {} FROM tokens WHERE token = ? LIMIT 1", TOKEN_COLUMNS);

        let row = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<AccessToken>, DomainError> {
        self.find_for_user(user_id, false).await
    }

    async fn find_all_valid_by_user(&self, user_id: Uuid) -> Result<Vec<AccessToken>, DomainError> {
        self.find_for_user(user_id, true).await
    }

    async fn revoke_token(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE tokens SET is_logged_out = TRUE WHERE token = ? AND is_logged_out = FALSE",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke token"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query(
            "UPDATE tokens SET is_logged_out = TRUE WHERE user_id = ? AND is_logged_out = FALSE",
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke tokens"))?;

        Ok(result.rows_affected() as usize)
    }
}
