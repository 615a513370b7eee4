//! Request and response data transfer objects.

pub mod auth;

pub use am_shared::types::response::ErrorResponse;
