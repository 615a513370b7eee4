//! Background sweep of expired reset tokens
//!
//! Expired rows are already unredeemable; the sweep keeps the table from
//! growing without bound.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::errors::DomainError;
use crate::repositories::PasswordResetRepository;

/// Configuration for the expiry sweep
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run the sweep
    pub interval_seconds: u64,

    /// Whether the sweep runs at all
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Periodic deleter of expired reset tokens
pub struct ResetTokenSweeper<R: PasswordResetRepository + 'static> {
    repository: Arc<R>,
    config: SweeperConfig,
}

impl<R: PasswordResetRepository> ResetTokenSweeper<R> {
    /// Create a new sweeper
    pub fn new(repository: Arc<R>, config: SweeperConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single sweep cycle
    pub async fn run_once(&self) -> Result<u64, DomainError> {
        let removed = self.repository.delete_expired().await?;
        if removed > 0 {
            info!(removed, "Deleted expired password reset tokens");
        }
        Ok(removed)
    }

    /// Spawn the sweep loop on the current runtime
    ///
    /// Errors are logged and the loop keeps running; a failed sweep only
    /// delays cleanup, it never affects correctness.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if !self.config.enabled {
                return;
            }

            let mut ticker =
                tokio::time::interval(Duration::from_secs(self.config.interval_seconds));
            // The first tick fires immediately; skip it so startup stays quiet.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once().await {
                    error!("Reset token sweep failed: {}", e);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::password_reset::PasswordResetToken;
    use crate::repositories::MockPasswordResetRepository;
    use chrono::{Duration as ChronoDuration, Utc};

    #[tokio::test]
    async fn test_run_once_removes_only_expired() {
        let repository = Arc::new(MockPasswordResetRepository::new());

        let mut expired = PasswordResetToken::new(1, "aa".repeat(32), 1);
        expired.expires_at = Utc::now() - ChronoDuration::hours(1);
        repository.insert(expired).await.unwrap();
        repository
            .insert(PasswordResetToken::new(2, "bb".repeat(32), 1))
            .await
            .unwrap();

        let sweeper = ResetTokenSweeper::new(repository.clone(), SweeperConfig::default());
        assert_eq!(sweeper.run_once().await.unwrap(), 1);
        assert_eq!(repository.len().await, 1);
    }
}
