//! Password reset token entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single-use, time-bounded password reset credential
///
/// State machine: `Issued -> Used` (terminal) or `Issued -> Expired`
/// (terminal, a validity predicate rather than an explicit transition).
/// The only permitted mutation is `used: false -> true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    /// Storage-assigned identifier (0 until persisted)
    pub id: u64,

    /// User this token belongs to
    pub user_id: u64,

    /// The token value itself: 64 hex characters, 256 bits of entropy
    pub token: String,

    /// Timestamp past which the token is invalid
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been consumed
    pub used: bool,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Creates a new unused token expiring `ttl_hours` from now
    pub fn new(user_id: u64, token: String, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            token,
            expires_at: now + Duration::hours(ttl_hours),
            used: false,
            created_at: now,
        }
    }

    /// Checks if the token has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the token can still be redeemed
    pub fn is_valid(&self) -> bool {
        !self.used && !self.is_expired()
    }
}
