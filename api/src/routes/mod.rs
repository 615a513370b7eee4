//! Route handlers and shared application state.

pub mod admin;
pub mod auth;

use std::sync::Arc;

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::account::AccountService;
use am_core::services::email::EmailSender;
use am_core::services::token::TokenService;

/// Application state shared across request handlers
pub struct AppState<U, R, E>
where
    U: UserRepository,
    R: PasswordResetRepository,
    E: EmailSender,
{
    /// Account use-case flows
    pub account_service: Arc<AccountService<U, R, E>>,

    /// Token codec, also consumed by the authentication gate
    pub token_service: Arc<TokenService>,
}
