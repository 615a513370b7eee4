//! Email dispatch implementation.
//!
//! The shipped transport logs the message instead of sending it; a real
//! provider (SMTP, SES, ...) slots in behind the same trait.

use async_trait::async_trait;
use tracing::info;

use am_core::errors::DomainError;
use am_core::services::email::EmailSender;
use am_shared::config::EmailConfig;

/// Logging email sender
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Create a new email service
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Build the reset link for a raw token
    fn reset_url(&self, reset_token: &str) -> String {
        format!(
            "{}/reset-password?token={}",
            self.config.app_url, reset_token
        )
    }
}

#[async_trait]
impl EmailSender for EmailService {
    async fn send_password_reset(
        &self,
        to: &str,
        reset_token: &str,
    ) -> Result<(), DomainError> {
        let reset_url = self.reset_url(reset_token);

        let body = format!(
            "Hello,\n\n\
             You have requested to reset your password. Please use the link \
             below to choose a new one:\n\n\
             {}\n\n\
             This link will expire in 1 hour.\n\n\
             If you did not request this, please ignore this email.\n\n\
             Best regards,\n\
             The AutoMart Team\n",
            reset_url
        );

        info!(
            to,
            from = %self.config.from_address,
            subject = "Password Reset Request",
            "Dispatching password reset email:\n{}",
            body
        );

        Ok(())
    }
}
