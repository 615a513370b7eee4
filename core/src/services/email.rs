//! Outbound email capability consumed by the account flows.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

/// Capability for dispatching password reset email
///
/// The core never builds the reset link itself; the implementation owns
/// the base URL and message formatting.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a password reset message carrying the raw token
    async fn send_password_reset(
        &self,
        to: &str,
        reset_token: &str,
    ) -> Result<(), DomainError>;
}

/// Recording email sender for testing
///
/// Stores every dispatched `(recipient, token)` pair instead of sending.
pub struct MockEmailSender {
    sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockEmailSender {
    /// Create a new recording sender
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Every `(recipient, token)` pair dispatched so far
    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.read().await.clone()
    }
}

impl Default for MockEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_password_reset(
        &self,
        to: &str,
        reset_token: &str,
    ) -> Result<(), DomainError> {
        let mut sent = self.sent.write().await;
        sent.push((to.to_string(), reset_token.to_string()));
        Ok(())
    }
}
