//! Assembled process configuration.

use std::env;

use am_shared::config::{
    auth::AuthConfig, database::DatabaseConfig, email::EmailConfig, environment::Environment,
    server::ServerConfig,
};

/// Everything the process needs, read from the environment exactly once
/// at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails when `JWT_SECRET` is absent; the service must not start
    /// with an unconfigured signing secret.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env()?,
            email: EmailConfig::from_env(),
            server: ServerConfig::from_env(),
            environment: Environment::from_env(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
