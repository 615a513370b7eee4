//! Password reset token repository trait.

use async_trait::async_trait;

use crate::domain::entities::password_reset::PasswordResetToken;
use crate::errors::DomainError;

/// Repository trait for password reset token persistence
///
/// Rows are immutable except for the single `used: false -> true` flip;
/// invalidation otherwise happens by deletion. Lookup is by exact token
/// value, which the storage layer backs with an indexed exact-match query.
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Persist a new token and return it with its storage-assigned `id`
    async fn insert(
        &self,
        token: PasswordResetToken,
    ) -> Result<PasswordResetToken, DomainError>;

    /// Find a token by its exact value
    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, DomainError>;

    /// Flip a token to used. Idempotent.
    async fn mark_used(&self, id: u64) -> Result<(), DomainError>;

    /// Delete every token belonging to a user, returning the count removed
    async fn delete_for_user(&self, user_id: u64) -> Result<u64, DomainError>;

    /// Delete every token past its expiry, returning the count removed
    async fn delete_expired(&self) -> Result<u64, DomainError>;
}
