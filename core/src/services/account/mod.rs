//! Account use-case flows
//!
//! Stateless orchestration of registration, login, the password reset
//! round-trip, and the admin self-modification guard. Each flow is a
//! finite sequence with early-exit error handling; no flow performs a
//! partial write it does not either roll back or document as accepted.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::{AccountService, AdminUserUpdate, NewAccount};
