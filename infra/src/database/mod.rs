//! Database connectivity and repository implementations.

pub mod mysql;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use am_shared::config::DatabaseConfig;

/// Create a MySQL connection pool from configuration
///
/// Storage timeouts are enforced here, at the pool, rather than inside
/// the domain core.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await
}
