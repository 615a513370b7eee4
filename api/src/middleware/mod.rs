//! Pre-handler filters applied at the request boundary.

pub mod admin;
pub mod auth;
pub mod cors;

pub use admin::RequireAdmin;
pub use auth::{CurrentUser, RequireAuth};
