//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{User, ADMIN_ROLE_ID, ROLE_ADMIN, ROLE_USER};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// Seeds the closed role set (`admin` = 1, `user` = 2) the way the schema
/// does, and mirrors the duplicate-email semantics of the real storage.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<u64, User>>>,
    roles: HashMap<String, u64>,
    next_id: AtomicU64,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        let mut roles = HashMap::new();
        roles.insert(ROLE_ADMIN.to_string(), ADMIN_ROLE_ID);
        roles.insert(ROLE_USER.to_string(), 2);

        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            roles,
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a user directly, bypassing duplicate checks (test setup)
    pub async fn seed(&self, mut user: User) -> User {
        if user.id == 0 {
            user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        user
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.uuid == uuid).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn role_id_by_name(&self, name: &str) -> Result<u64, DomainError> {
        self.roles
            .get(name)
            .copied()
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("Role '{}'", name),
            })
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AuthError::DuplicateEmail.into());
        }

        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: u64,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = chrono::Utc::now();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }

    async fn admin_update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AuthError::DuplicateEmail.into());
        }

        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                existing.updated_at = chrono::Utc::now();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }

    async fn delete(&self, id: u64) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }
}
