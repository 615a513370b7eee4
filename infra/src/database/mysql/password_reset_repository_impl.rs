//! MySQL implementation of the PasswordResetRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use am_core::domain::entities::password_reset::PasswordResetToken;
use am_core::errors::DomainError;
use am_core::repositories::PasswordResetRepository;

use super::storage_error;

/// MySQL implementation of PasswordResetRepository
///
/// The token column carries a unique index; lookup is exact-match. The
/// only row mutation is the `used` flip, which relies on the row-level
/// atomicity of a single UPDATE.
pub struct MySqlPasswordResetRepository {
    pool: MySqlPool,
}

impl MySqlPasswordResetRepository {
    /// Create a new MySQL password reset repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a PasswordResetToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<PasswordResetToken, DomainError> {
        let map = |e: sqlx::Error| storage_error("Failed to read reset token row", e);

        Ok(PasswordResetToken {
            id: row.try_get::<u64, _>("id").map_err(map)?,
            user_id: row.try_get::<u64, _>("user_id").map_err(map)?,
            token: row.try_get("token").map_err(map)?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(map)?,
            used: row.try_get("used").map_err(map)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(map)?,
        })
    }
}

#[async_trait]
impl PasswordResetRepository for MySqlPasswordResetRepository {
    async fn insert(
        &self,
        mut token: PasswordResetToken,
    ) -> Result<PasswordResetToken, DomainError> {
        let query = r#"
            INSERT INTO password_reset_tokens (user_id, token, expires_at, used, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(token.user_id)
            .bind(&token.token)
            .bind(token.expires_at)
            .bind(token.used)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to insert reset token", e))?;

        token.id = result.last_insert_id();
        Ok(token)
    }

    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, expires_at, used, created_at
            FROM password_reset_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find reset token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn mark_used(&self, id: u64) -> Result<(), DomainError> {
        sqlx::query("UPDATE password_reset_tokens SET used = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to mark reset token used", e))?;

        Ok(())
    }

    async fn delete_for_user(&self, user_id: u64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete user reset tokens", e))?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete expired reset tokens", e))?;

        Ok(result.rows_affected())
    }
}
