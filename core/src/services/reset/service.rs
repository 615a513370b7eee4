//! Reset token issuance and validation.

use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;

use crate::domain::entities::password_reset::PasswordResetToken;
use crate::errors::{DomainError, TokenError};
use crate::repositories::PasswordResetRepository;

/// Bytes of entropy per reset token (hex-encodes to 64 characters)
const RESET_TOKEN_BYTES: usize = 32;

/// Service managing the reset token state machine
///
/// A token moves `Issued -> Used` exactly once, or dies by expiry. The
/// token value is the credential itself, so lookups are exact-match
/// against the stored value.
pub struct PasswordResetService<R: PasswordResetRepository> {
    repository: Arc<R>,
}

impl<R: PasswordResetRepository> PasswordResetService<R> {
    /// Creates a new reset token service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Issues a fresh token for a user, valid for `ttl_hours`
    ///
    /// Entropy comes from the operating system CSPRNG; exhaustion is
    /// fatal to the calling flow. A value collision would surface as a
    /// storage error and is not handled specially.
    pub async fn create(
        &self,
        user_id: u64,
        ttl_hours: i64,
    ) -> Result<PasswordResetToken, DomainError> {
        let token_value = generate_secure_token()?;
        let token = PasswordResetToken::new(user_id, token_value, ttl_hours);
        self.repository.insert(token).await
    }

    /// Validates a candidate token value
    ///
    /// An unknown token and an expired token both fail with
    /// [`TokenError::Invalid`] so a caller cannot distinguish "wrong
    /// token" from "never existed". A known-but-consumed token fails with
    /// [`TokenError::AlreadyUsed`].
    pub async fn validate_token(
        &self,
        token: &str,
    ) -> Result<PasswordResetToken, DomainError> {
        let reset_token = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or(DomainError::Token(TokenError::Invalid))?;

        if reset_token.used {
            return Err(TokenError::AlreadyUsed.into());
        }

        if reset_token.is_expired() {
            return Err(TokenError::Invalid.into());
        }

        Ok(reset_token)
    }

    /// Flips a token to used. Idempotent.
    pub async fn mark_as_used(&self, id: u64) -> Result<(), DomainError> {
        self.repository.mark_used(id).await
    }

    /// Invalidates all outstanding tokens for a user by deletion
    pub async fn delete_user_tokens(&self, user_id: u64) -> Result<u64, DomainError> {
        self.repository.delete_for_user(user_id).await
    }

    /// Removes every expired token, returning the count removed
    pub async fn delete_expired(&self) -> Result<u64, DomainError> {
        self.repository.delete_expired().await
    }
}

/// Generate 256 bits of CSPRNG entropy, hex-encoded
fn generate_secure_token() -> Result<String, DomainError> {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| DomainError::Internal {
            message: format!("Entropy source failure: {}", e),
        })?;
    Ok(hex::encode(bytes))
}
