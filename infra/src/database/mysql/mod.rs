//! MySQL repository implementations.

mod password_reset_repository_impl;
mod user_repository_impl;

pub use password_reset_repository_impl::MySqlPasswordResetRepository;
pub use user_repository_impl::MySqlUserRepository;

use am_core::errors::DomainError;

/// Check whether a SQLx error is a unique-constraint violation
///
/// Used to translate a duplicate-email insert race into the same domain
/// outcome as the pre-insert existence check.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().map(|db| db.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}

/// Map a SQLx error to an opaque internal domain error
///
/// Storage detail (which constraint fired, which column) stays in the
/// log context and never reaches the response body.
pub(crate) fn storage_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, err),
    }
}
