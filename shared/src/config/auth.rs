//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Default access token lifetime in hours
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Default password-reset token lifetime in hours
const DEFAULT_RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Authentication configuration
///
/// The signing secret has no default. A deployment that does not provision
/// `JWT_SECRET` fails at startup instead of silently signing tokens with a
/// predictable value.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret key for signing access tokens
    pub jwt_secret: String,

    /// Access token lifetime in hours
    pub token_ttl_hours: i64,

    /// Password-reset token lifetime in hours
    pub reset_token_ttl_hours: i64,
}

impl AuthConfig {
    /// Create a new configuration with an explicit secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            reset_token_ttl_hours: DEFAULT_RESET_TOKEN_TTL_HOURS,
        }
    }

    /// Load from environment variables
    ///
    /// Fails when `JWT_SECRET` is absent.
    pub fn from_env() -> Result<Self, env::VarError> {
        let jwt_secret = env::var("JWT_SECRET")?;

        let token_ttl_hours = env::var("JWT_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);

        let reset_token_ttl_hours = env::var("RESET_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RESET_TOKEN_TTL_HOURS);

        Ok(Self {
            jwt_secret,
            token_ttl_hours,
            reset_token_ttl_hours,
        })
    }
}
