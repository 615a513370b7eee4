//! User repository trait defining the interface for account persistence.
//!
//! The core consumes users by reference; the implementations of this trait
//! own the actual database operations while maintaining the abstraction
//! boundary between domain and infrastructure layers.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Lookups return `Ok(None)` for absent rows; the caller decides whether
/// absence is an error. `create` and `admin_update` translate a storage
/// unique-constraint violation on the email column into
/// [`AuthError::DuplicateEmail`](crate::errors::AuthError::DuplicateEmail)
/// so callers see the same outcome as the pre-insert existence check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address (case-insensitive, expects a
    /// lower-cased argument)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by storage identifier
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError>;

    /// Find a user by public UUID
    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<User>, DomainError>;

    /// Check whether any account already uses the email address
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Resolve a role identifier from the closed role lookup set
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - the role name is not seeded
    async fn role_id_by_name(&self, name: &str) -> Result<u64, DomainError>;

    /// Persist a new user and return it with its storage-assigned `id`
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the password hash for an account
    async fn update_password(&self, user_id: u64, password_hash: &str)
        -> Result<(), DomainError>;

    /// Apply an administrative update (profile, role, active flag)
    async fn admin_update(&self, user: &User) -> Result<(), DomainError>;

    /// Delete an account
    ///
    /// # Returns
    /// * `Ok(true)` - account deleted
    /// * `Ok(false)` - no such account
    async fn delete(&self, id: u64) -> Result<bool, DomainError>;
}
