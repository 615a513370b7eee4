//! Authentication and token error definitions
//!
//! External messages are deliberately coarse: login and forgot-password
//! failures never reveal whether an email is registered. Registration is
//! the one place a duplicate email must surface.

use thiserror::Error;

/// Authentication and account-management errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Covers unknown email, inactive account, and wrong password alike
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("The email is already taken")]
    DuplicateEmail,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Cannot modify your own account via the admin surface")]
    SelfActionForbidden,

    #[error("Cannot delete admin accounts")]
    AdminAccountProtected,
}

/// Token validation and management errors
///
/// Access token failures all translate to the same 401 at the boundary;
/// reset token failures keep their distinction because the token itself
/// already proves a credential.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    /// Reset token unknown or past its expiry
    #[error("Invalid or expired reset token")]
    Invalid,

    /// Reset token already redeemed
    #[error("Reset token has already been used")]
    AlreadyUsed,

    #[error("Token generation failed")]
    GenerationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_auth_error_message_does_not_enumerate() {
        // Unknown account and wrong password must read identically.
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_token_error_bridges_into_domain_error() {
        let err: DomainError = TokenError::AlreadyUsed.into();
        assert!(matches!(err, DomainError::Token(TokenError::AlreadyUsed)));
        assert_eq!(err.to_string(), "Reset token has already been used");
    }
}
