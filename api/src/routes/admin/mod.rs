//! Administrative endpoints.
//!
//! Routed behind both gate middlewares; the handlers additionally pass
//! the caller's principal into the orchestrator, which enforces the
//! self-modification guard.

mod users;

pub use users::{delete_user, update_user};
