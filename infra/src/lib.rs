//! # AutoMart Infrastructure
//!
//! Concrete implementations of the core's storage and email
//! collaborators: MySQL repositories over SQLx and the logging email
//! sender used until a real transport is wired in.

pub mod database;
pub mod email;

pub use database::mysql::{MySqlPasswordResetRepository, MySqlUserRepository};
pub use database::create_pool;
pub use email::EmailService;
