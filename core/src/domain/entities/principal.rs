//! Authenticated principal derived from a validated access token.

use serde::{Deserialize, Serialize};

use super::user::ADMIN_ROLE_ID;

/// The authenticated identity and role for one request
///
/// A `Principal` exists only for the lifetime of the request it was decoded
/// for. It is never persisted; the access token is the durable proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identifier of the authenticated user
    pub user_id: u64,

    /// Email address asserted by the token
    pub email: String,

    /// Role the user held when the token was issued
    pub role_id: u64,
}

impl Principal {
    /// Checks whether this principal holds the administrator role
    pub fn is_admin(&self) -> bool {
        self.role_id == ADMIN_ROLE_ID
    }

    /// Checks whether this principal may mutate a resource owned by
    /// `owner_id`
    ///
    /// Owners may touch their own resources; administrators may touch
    /// anything. Handlers guarding a mutation apply this check inline.
    pub fn can_modify(&self, owner_id: u64) -> bool {
        self.user_id == owner_id || self.is_admin()
    }
}
