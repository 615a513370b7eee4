//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use am_core::domain::entities::user::User;
use am_core::errors::{AuthError, DomainError};
use am_core::repositories::UserRepository;

use super::{is_unique_violation, storage_error};

const USER_COLUMNS: &str = "id, uuid, role_id, first_name, last_name, email, phone, \
     password_hash, active, accepted_terms_at, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let map =
            |e: sqlx::Error| storage_error("Failed to read user row", e);

        Ok(User {
            id: row.try_get::<u64, _>("id").map_err(map)?,
            uuid: row.try_get("uuid").map_err(map)?,
            role_id: row.try_get::<u64, _>("role_id").map_err(map)?,
            first_name: row.try_get("first_name").map_err(map)?,
            last_name: row.try_get("last_name").map_err(map)?,
            email: row.try_get("email").map_err(map)?,
            phone: row.try_get("phone").map_err(map)?,
            password_hash: row.try_get("password_hash").map_err(map)?,
            active: row.try_get("active").map_err(map)?,
            accepted_terms_at: row
                .try_get::<Option<DateTime<Utc>>, _>("accepted_terms_at")
                .map_err(map)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(map)?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(map)?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE email = ? LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user by email", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE uuid = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find user by uuid", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE email = ?")
            .bind(email.to_lowercase())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to check email existence", e))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| storage_error("Failed to read existence count", e))?;
        Ok(count > 0)
    }

    async fn role_id_by_name(&self, name: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("SELECT id FROM roles WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to look up role", e))?;

        let row = result.ok_or_else(|| DomainError::NotFound {
            resource: format!("Role '{}'", name),
        })?;

        row.try_get::<u64, _>("id")
            .map_err(|e| storage_error("Failed to read role id", e))
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                uuid, role_id, first_name, last_name, email, phone,
                password_hash, active, accepted_terms_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.uuid)
            .bind(user.role_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(user.active)
            .bind(user.accepted_terms_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::DuplicateEmail.into()
                } else {
                    storage_error("Failed to create user", e)
                }
            })?;

        user.id = result.last_insert_id();
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: u64,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update password", e))?;

        Ok(())
    }

    async fn admin_update(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET role_id = ?, first_name = ?, last_name = ?, email = ?,
                phone = ?, active = ?, updated_at = ?
            WHERE id = ?
        "#;

        sqlx::query(query)
            .bind(user.role_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.email.to_lowercase())
            .bind(&user.phone)
            .bind(user.active)
            .bind(Utc::now())
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AuthError::DuplicateEmail.into()
                } else {
                    storage_error("Failed to update user", e)
                }
            })?;

        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
