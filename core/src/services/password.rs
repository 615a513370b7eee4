//! Credential hashing built on bcrypt.
//!
//! bcrypt embeds a per-call random salt in its output, so two hashes of the
//! same password never match, and its verify runs in time independent of
//! where a mismatch occurs.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::DomainError;

/// Hash a plaintext password for storage
///
/// A hashing failure (entropy source exhaustion) is fatal to the calling
/// operation and is never silently bypassed.
pub fn hash_password(plain: &str) -> Result<String, DomainError> {
    hash(plain, DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}

/// Verify a plaintext password against a stored hash
///
/// A malformed stored hash counts as a mismatch rather than an error; the
/// caller cannot do anything else with it.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}
