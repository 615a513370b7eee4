//! Domain entities for the authentication core.

pub mod claims;
pub mod password_reset;
pub mod principal;
pub mod user;

pub use claims::{Claims, TOKEN_TTL_HOURS};
pub use password_reset::PasswordResetToken;
pub use principal::Principal;
pub use user::{Role, User, ADMIN_ROLE_ID, ROLE_ADMIN, ROLE_USER};
