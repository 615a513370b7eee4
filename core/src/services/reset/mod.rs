//! Password reset token lifecycle
//!
//! Issues single-use, time-bounded reset tokens backed by durable
//! storage, validates inbound tokens, and sweeps expired rows in the
//! background.

mod cleanup;
mod service;

pub use cleanup::{ResetTokenSweeper, SweeperConfig};
pub use service::PasswordResetService;
