//! Account orchestration service.

use std::sync::Arc;
use tracing::{info, warn};

use am_shared::utils::validation::normalize_email;

use crate::domain::entities::principal::Principal;
use crate::domain::entities::user::{User, ADMIN_ROLE_ID};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{PasswordResetRepository, UserRepository};
use crate::services::email::EmailSender;
use crate::services::password::{hash_password, verify_password};
use crate::services::reset::PasswordResetService;
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;

/// Input for the registration flow
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// Administrative changes to an account; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct AdminUserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role_id: Option<u64>,
    pub active: Option<bool>,
}

/// Use-case layer combining the hasher, token codec, reset token store,
/// and storage collaborators
///
/// The registration and password endpoints call this directly, outside
/// the authorization gate, since their callers are not yet authenticated.
pub struct AccountService<U, R, E>
where
    U: UserRepository,
    R: PasswordResetRepository,
    E: EmailSender,
{
    users: Arc<U>,
    reset_tokens: PasswordResetService<R>,
    email: Arc<E>,
    tokens: Arc<TokenService>,
    config: AccountServiceConfig,
}

impl<U, R, E> AccountService<U, R, E>
where
    U: UserRepository,
    R: PasswordResetRepository,
    E: EmailSender,
{
    /// Creates a new account service
    pub fn new(
        users: Arc<U>,
        reset_tokens: PasswordResetService<R>,
        email: Arc<E>,
        tokens: Arc<TokenService>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            users,
            reset_tokens,
            email,
            tokens,
            config,
        }
    }

    /// Registers a new account and signs it in
    ///
    /// The pre-insert existence check and the storage unique constraint
    /// both map to [`AuthError::DuplicateEmail`], so a race between the
    /// check and the insert surfaces the same outcome either way.
    pub async fn register(&self, account: NewAccount) -> Result<(User, String), DomainError> {
        let email = normalize_email(&account.email);

        if self.users.email_exists(&email).await? {
            return Err(AuthError::DuplicateEmail.into());
        }

        let password_hash = hash_password(&account.password)?;
        let role_id = self.users.role_id_by_name(&self.config.default_role).await?;

        let user = User::new(
            role_id,
            account.first_name,
            account.last_name,
            email,
            account.phone,
            password_hash,
        );

        let created = self.users.create(user).await?;
        let token = self
            .tokens
            .issue(created.id, &created.email, created.role_id)?;

        info!(user_id = created.id, "Account registered");
        Ok((created, token))
    }

    /// Authenticates an account by email and password
    ///
    /// Unknown email, inactive account, and wrong password are externally
    /// indistinguishable: each yields [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), DomainError> {
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.active {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(user.id, &user.email, user.role_id)?;
        Ok((user, token))
    }

    /// Starts the password reset flow for an email address
    ///
    /// Returns `Ok(())` whether or not the address belongs to an active
    /// account; an attacker observing responses learns nothing. For a
    /// real account, prior tokens are invalidated before a new one is
    /// issued so at most one valid token exists per user.
    pub async fn forgot_password(&self, email: &str) -> Result<(), DomainError> {
        let email = normalize_email(email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) if user.active => user,
            _ => return Ok(()),
        };

        // Invalidating prior tokens is best-effort: a failure here leaves an
        // extra valid token behind but must not block the new issuance.
        if let Err(e) = self.reset_tokens.delete_user_tokens(user.id).await {
            warn!(user_id = user.id, "Failed to delete prior reset tokens: {}", e);
        }

        let reset_token = self
            .reset_tokens
            .create(user.id, self.config.reset_token_ttl_hours)
            .await?;

        self.email
            .send_password_reset(&user.email, &reset_token.token)
            .await?;

        Ok(())
    }

    /// Completes a password reset
    ///
    /// Token errors propagate distinctly ([`TokenError::Invalid`] vs
    /// [`TokenError::AlreadyUsed`]); the token itself already proves a
    /// credential so there is no enumeration risk here. Marking the token
    /// used after the password rotation is best-effort: the
    /// security-critical effect has already landed.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let reset_token = self.reset_tokens.validate_token(token).await?;

        let user = self
            .users
            .find_by_id(reset_token.user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::Invalid))?;

        let password_hash = hash_password(new_password)?;
        self.users.update_password(user.id, &password_hash).await?;

        if let Err(e) = self.reset_tokens.mark_as_used(reset_token.id).await {
            warn!(
                token_id = reset_token.id,
                "Failed to mark reset token as used after password rotation: {}", e
            );
        }

        info!(user_id = user.id, "Password reset completed");
        Ok(())
    }

    /// Loads the profile of an authenticated user
    pub async fn get_profile(&self, user_id: u64) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "User".to_string(),
            })
    }

    /// Applies an administrative update to another account
    ///
    /// An admin may not modify their own account through this surface.
    pub async fn admin_update_user(
        &self,
        principal: &Principal,
        uuid: &str,
        update: AdminUserUpdate,
    ) -> Result<User, DomainError> {
        let mut user = self
            .users
            .find_by_uuid(uuid)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        if user.id == principal.user_id {
            return Err(AuthError::SelfActionForbidden.into());
        }

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = update.email {
            user.email = normalize_email(&email);
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        if let Some(role_id) = update.role_id {
            user.role_id = role_id;
        }
        if let Some(active) = update.active {
            user.active = active;
        }

        self.users.admin_update(&user).await?;
        Ok(user)
    }

    /// Deletes another account through the admin surface
    ///
    /// Self-deletion is rejected, and so is deleting any account holding
    /// the admin role; the latter is a blanket protection, not just a
    /// self-check.
    pub async fn admin_delete_user(
        &self,
        principal: &Principal,
        uuid: &str,
    ) -> Result<(), DomainError> {
        let user = self
            .users
            .find_by_uuid(uuid)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        if user.id == principal.user_id {
            return Err(AuthError::SelfActionForbidden.into());
        }

        if user.role_id == ADMIN_ROLE_ID {
            return Err(AuthError::AdminAccountProtected.into());
        }

        if !self.users.delete(user.id).await? {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(())
    }
}
