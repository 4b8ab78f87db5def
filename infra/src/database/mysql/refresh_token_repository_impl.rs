//! MySQL implementation of the RefreshTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use todo_core::domain::entities::token::RefreshToken;
use todo_core::errors::DomainError;
use todo_core::repositories::RefreshTokenRepository;

use super::{db_error, parse_uuid};

const REFRESH_TOKEN_COLUMNS: &str = "id, user_id, token_hash, created_at, expires_at, is_revoked";

/// MySQL implementation of RefreshTokenRepository
///
/// Only SHA-256 digests of refresh tokens are stored.
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row.try_get("id").map_err(db_error("Failed to get id"))?;
        let user_id: String = row.try_get("user_id").map_err(db_error("Failed to get user_id"))?;

        Ok(RefreshToken {
            id: parse_uuid(&id, "refresh_tokens.id")?,
            user_id: parse_uuid(&user_id, "refresh_tokens.user_id")?,
            token_hash: row.try_get("token_hash").map_err(db_error("Failed to get token_hash"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(db_error("Failed to get created_at"))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(db_error("Failed to get expires_at"))?,
            is_revoked: row.try_get("is_revoked").map_err(db_error("Failed to get is_revoked"))?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn rotate(&self, token: RefreshToken) -> Result<usize, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        sqlx::query("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(token.user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock user row"))?;

        let revoked = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE WHERE user_id = ? AND is_revoked = FALSE",
        )
        .bind(token.user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke refresh tokens"))?
        .rows_affected();

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, created_at, expires_at, is_revoked)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(token.id.to_string())
        .bind(token.user_id.to_string())
        .bind(&token.token_hash)
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.is_revoked)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to save refresh token"))?;

        tx.commit().await.map_err(db_error("Failed to commit refresh token rotation"))?;

        Ok(revoked as usize)
    }

    async fn consume(
        &self,
        token_hash: &str,
        replacement: RefreshToken,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Same lock order as rotate
        sqlx::query("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(replacement.user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to lock user row"))?;

        // The conditional update decides the winner among concurrent redeemers
        let redeemed = sqlx::query(
            r#"
            UPDATE refresh_tokens SET is_revoked = TRUE
            WHERE token_hash = ? AND user_id = ? AND is_revoked = FALSE AND expires_at > ?
            "#,
        )
        .bind(token_hash)
        .bind(replacement.user_id.to_string())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to redeem refresh token"))?
        .rows_affected();

        if redeemed != 1 {
            tx.rollback().await.map_err(db_error("Failed to roll back refresh token redeem"))?;
            return Ok(None);
        }

        sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE WHERE user_id = ? AND is_revoked = FALSE",
        )
        .bind(replacement.user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to revoke refresh tokens"))?;

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, created_at, expires_at, is_revoked)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(replacement.id.to_string())
        .bind(replacement.user_id.to_string())
        .bind(&replacement.token_hash)
        .bind(replacement.created_at)
        .bind(replacement.expires_at)
        .bind(replacement.is_revoked)
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to save refresh token"))?;

        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token_hash = ? LIMIT 1",
            REFRESH_TOKEN_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(token_hash)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to load redeemed refresh token"))?;
        let consumed = Self::row_to_token(&row)?;

        tx.commit().await.map_err(db_error("Failed to commit refresh token redeem"))?;

        Ok(Some(consumed))
    }

    async fn find_valid(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token_hash = ? AND is_revoked = FALSE AND expires_at > ? LIMIT 1",
            REFRESH_TOKEN_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(token_hash)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token_hash = ? LIMIT 1",
            REFRESH_TOKEN_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query(
            "UPDATE refresh_tokens SET is_revoked = TRUE WHERE user_id = ? AND is_revoked = FALSE",
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to revoke refresh tokens"))?;

        Ok(result.rows_affected() as usize)
    }
}
