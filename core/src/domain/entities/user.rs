//! User entity representing a registered account in the AutoMart system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role identifier of the administrator role.
///
/// Roles are a small closed lookup set seeded with the schema; the admin
/// role is a well-known constant rather than a dynamic policy.
pub const ADMIN_ROLE_ID: u64 = 1;

/// Name of the administrator role
pub const ROLE_ADMIN: &str = "admin";

/// Name of the default role assigned at registration
pub const ROLE_USER: &str = "user";

/// A role in the closed role lookup set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier for the role
    pub id: u64,

    /// Role name (`admin`, `user`, ...)
    pub name: String,
}

/// User entity representing a registered account
///
/// The core consumes users by reference; business-entity ownership lives
/// elsewhere. The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier (0 until persisted)
    pub id: u64,

    /// Public identifier used in URLs
    pub uuid: String,

    /// Role this account holds
    pub role_id: u64,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address, stored lower-cased
    pub email: String,

    /// Optional phone number
    pub phone: Option<String>,

    /// Hashed password, never exposed on the wire
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account may authenticate
    pub active: bool,

    /// When the account holder accepted the terms
    pub accepted_terms_at: Option<DateTime<Utc>>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance ready for persistence
    ///
    /// The storage layer assigns `id`; everything else is set here,
    /// including a fresh public UUID and a lower-cased email.
    pub fn new(
        role_id: u64,
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            uuid: Uuid::new_v4().to_string(),
            role_id,
            first_name,
            last_name,
            email: email.to_lowercase(),
            phone,
            password_hash,
            active: true,
            accepted_terms_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the account holds the administrator role
    pub fn is_admin(&self) -> bool {
        self.role_id == ADMIN_ROLE_ID
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
