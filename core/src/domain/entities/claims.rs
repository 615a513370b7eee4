//! Access token claims for stateless authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::principal::Principal;

/// Access token lifetime in hours
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claim set carried by an access token
///
/// Validity is purely a function of the signature and the `nbf`/`exp`
/// window; nothing is stored server-side and there is no revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identifier of the authenticated user
    pub user_id: u64,

    /// Email address at issuance time
    pub email: String,

    /// Role held at issuance time
    pub role_id: u64,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates a new claim set valid from now for `ttl_hours`
    pub fn new(user_id: u64, email: impl Into<String>, role_id: u64, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::hours(ttl_hours);

        Self {
            user_id,
            email: email.into(),
            role_id,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The principal these claims assert
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id,
            email: self.email.clone(),
            role_id: self.role_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_window() {
        let claims = Claims::new(7, "a@b.com", 2, TOKEN_TTL_HOURS);

        assert_eq!(claims.iat, claims.nbf);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new(7, "a@b.com", 2, TOKEN_TTL_HOURS);
        claims.exp = claims.iat - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_principal_conversion() {
        let claims = Claims::new(7, "a@b.com", 2, TOKEN_TTL_HOURS);
        let principal = claims.principal();

        assert_eq!(principal.user_id, 7);
        assert_eq!(principal.email, "a@b.com");
        assert_eq!(principal.role_id, 2);
    }
}
