//! Shared utilities and common types for the AutoMart server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The wire-level error response structure
//! - Validation utilities (password policy, email normalization)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AuthConfig, DatabaseConfig, EmailConfig, Environment, ServerConfig,
};
pub use types::ErrorResponse;
pub use utils::validation;
