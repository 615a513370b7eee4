//! Configuration for the account service

use am_shared::config::AuthConfig;

use crate::domain::entities::user::ROLE_USER;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Lifetime of issued password reset tokens in hours
    pub reset_token_ttl_hours: i64,

    /// Role name assigned to newly registered accounts
    pub default_role: String,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            reset_token_ttl_hours: 1,
            default_role: ROLE_USER.to_string(),
        }
    }
}

impl From<&AuthConfig> for AccountServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            reset_token_ttl_hours: config.reset_token_ttl_hours,
            ..Default::default()
        }
    }
}
