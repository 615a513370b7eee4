//! Configuration for the token service

use am_shared::config::AuthConfig;

use crate::domain::entities::claims::TOKEN_TTL_HOURS;

/// Configuration for the token service
///
/// There is deliberately no `Default`: the signing secret must be
/// provisioned explicitly, at construction time, by whoever builds the
/// service.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Signing secret shared by issuer and verifier
    pub secret: String,

    /// Access token lifetime in hours
    pub token_ttl_hours: i64,
}

impl TokenServiceConfig {
    /// Create a configuration with the default 24 hour lifetime
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_hours: TOKEN_TTL_HOURS,
        }
    }
}

impl From<&AuthConfig> for TokenServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            token_ttl_hours: config.token_ttl_hours,
        }
    }
}
