//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// Configuration for the outbound email collaborator
///
/// `app_url` is the public base URL embedded in password-reset links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Sender address
    pub from_address: String,

    /// Application base URL for reset links
    pub app_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_address: String::from("noreply@automart.example"),
            app_url: String::from("http://localhost:8080"),
        }
    }
}

impl EmailConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let from_address = std::env::var("EMAIL_FROM")
            .unwrap_or_else(|_| "noreply@automart.example".to_string());
        let app_url =
            std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self {
            from_address,
            app_url,
        }
    }
}
