//! End-to-end tests for the account flows against the in-memory
//! repositories.

use std::sync::Arc;

use crate::domain::entities::principal::Principal;
use crate::domain::entities::user::{User, ADMIN_ROLE_ID};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{
    MockPasswordResetRepository, MockUserRepository, PasswordResetRepository, UserRepository,
};
use crate::services::account::{AccountService, AccountServiceConfig, AdminUserUpdate, NewAccount};
use crate::services::email::MockEmailSender;
use crate::services::password::hash_password;
use crate::services::reset::PasswordResetService;
use crate::services::token::{TokenService, TokenServiceConfig};

type TestAccountService =
    AccountService<MockUserRepository, MockPasswordResetRepository, MockEmailSender>;

struct Harness {
    service: TestAccountService,
    users: Arc<MockUserRepository>,
    reset_tokens: Arc<MockPasswordResetRepository>,
    email: Arc<MockEmailSender>,
    tokens: Arc<TokenService>,
}

fn harness() -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let reset_tokens = Arc::new(MockPasswordResetRepository::new());
    let email = Arc::new(MockEmailSender::new());
    let tokens = Arc::new(
        TokenService::new(TokenServiceConfig::new("account-tests-secret-0123456789")).unwrap(),
    );

    let service = AccountService::new(
        users.clone(),
        PasswordResetService::new(reset_tokens.clone()),
        email.clone(),
        tokens.clone(),
        AccountServiceConfig::default(),
    );

    Harness {
        service,
        users,
        reset_tokens,
        email,
        tokens,
    }
}

fn new_account(email: &str) -> NewAccount {
    NewAccount {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        phone: None,
        password: "Password123".to_string(),
    }
}

fn admin_principal(user_id: u64) -> Principal {
    Principal {
        user_id,
        email: "admin@automart.example".to_string(),
        role_id: ADMIN_ROLE_ID,
    }
}

#[tokio::test]
async fn test_register_issues_valid_token() {
    let h = harness();

    let (user, token) = h.service.register(new_account("a@b.com")).await.unwrap();
    assert!(user.id > 0);
    assert_eq!(user.email, "a@b.com");

    let principal = h.tokens.validate(&token).unwrap();
    assert_eq!(principal.user_id, user.id);
    assert_eq!(principal.role_id, user.role_id);
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let h = harness();
    h.service.register(new_account("a@b.com")).await.unwrap();

    let err = h
        .service
        .register(new_account("A@B.COM"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::DuplicateEmail)));
}

#[tokio::test]
async fn test_login_success_and_wrong_password() {
    let h = harness();
    h.service.register(new_account("a@b.com")).await.unwrap();

    assert!(h.service.login("a@b.com", "Password123").await.is_ok());
    // Email lookup is case-insensitive.
    assert!(h.service.login("A@b.com", "Password123").await.is_ok());

    let err = h.service.login("a@b.com", "wrong").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_login_inactive_account_indistinguishable_from_wrong_password() {
    let h = harness();
    let (user, _) = h.service.register(new_account("a@b.com")).await.unwrap();

    let mut inactive = h.users.find_by_id(user.id).await.unwrap().unwrap();
    inactive.active = false;
    h.users.admin_update(&inactive).await.unwrap();

    // Correct credentials against an inactive account...
    let inactive_err = h
        .service
        .login("a@b.com", "Password123")
        .await
        .unwrap_err();
    // ...and a wrong password against an unknown account...
    let unknown_err = h.service.login("ghost@b.com", "wrong").await.unwrap_err();

    // ...must surface as the same external failure.
    assert!(matches!(
        inactive_err,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        unknown_err,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_forgot_password_unknown_email_does_nothing() {
    let h = harness();

    h.service.forgot_password("ghost@b.com").await.unwrap();

    assert!(h.email.sent_messages().await.is_empty());
    assert!(h.reset_tokens.is_empty().await);
}

#[tokio::test]
async fn test_forgot_password_inactive_account_does_nothing() {
    let h = harness();
    let (user, _) = h.service.register(new_account("a@b.com")).await.unwrap();

    let mut inactive = h.users.find_by_id(user.id).await.unwrap().unwrap();
    inactive.active = false;
    h.users.admin_update(&inactive).await.unwrap();

    h.service.forgot_password("a@b.com").await.unwrap();
    assert!(h.email.sent_messages().await.is_empty());
}

#[tokio::test]
async fn test_forgot_password_issues_exactly_one_valid_token() {
    let h = harness();
    h.service.register(new_account("a@b.com")).await.unwrap();

    h.service.forgot_password("a@b.com").await.unwrap();
    assert_eq!(h.reset_tokens.len().await, 1);

    let sent = h.email.sent_messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "a@b.com");
    assert_eq!(sent[0].1.len(), 64);
}

#[tokio::test]
async fn test_second_forgot_password_invalidates_first_token() {
    let h = harness();
    h.service.register(new_account("a@b.com")).await.unwrap();

    h.service.forgot_password("a@b.com").await.unwrap();
    let first_token = h.email.sent_messages().await[0].1.clone();

    h.service.forgot_password("a@b.com").await.unwrap();
    assert_eq!(h.reset_tokens.len().await, 1);

    assert!(h
        .reset_tokens
        .find_by_token(&first_token)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_reset_password_round_trip() {
    let h = harness();
    h.service.register(new_account("a@b.com")).await.unwrap();

    h.service.forgot_password("a@b.com").await.unwrap();
    let token = h.email.sent_messages().await[0].1.clone();

    h.service
        .reset_password(&token, "NewPassword456")
        .await
        .unwrap();

    // Old password no longer works, new one does.
    assert!(h.service.login("a@b.com", "Password123").await.is_err());
    assert!(h.service.login("a@b.com", "NewPassword456").await.is_ok());
}

#[tokio::test]
async fn test_reset_password_token_is_single_use() {
    let h = harness();
    h.service.register(new_account("a@b.com")).await.unwrap();

    h.service.forgot_password("a@b.com").await.unwrap();
    let token = h.email.sent_messages().await[0].1.clone();

    h.service
        .reset_password(&token, "NewPassword456")
        .await
        .unwrap();

    let err = h
        .service
        .reset_password(&token, "Another789pass")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Token(TokenError::AlreadyUsed)
    ));
}

#[tokio::test]
async fn test_reset_password_unknown_token_rejected() {
    let h = harness();

    let err = h
        .service
        .reset_password(&"ff".repeat(32), "NewPassword456")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Invalid)));
}

async fn seed_admin(h: &Harness) -> User {
    let admin = User::new(
        ADMIN_ROLE_ID,
        "Root".to_string(),
        "Admin".to_string(),
        "admin@automart.example".to_string(),
        None,
        hash_password("AdminPass123").unwrap(),
    );
    h.users.seed(admin).await
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let h = harness();
    let admin = seed_admin(&h).await;

    let err = h
        .service
        .admin_delete_user(&admin_principal(admin.id), &admin.uuid)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::SelfActionForbidden)
    ));
}

#[tokio::test]
async fn test_admin_cannot_delete_other_admins() {
    let h = harness();
    let admin = seed_admin(&h).await;

    let other_admin = User::new(
        ADMIN_ROLE_ID,
        "Second".to_string(),
        "Admin".to_string(),
        "admin2@automart.example".to_string(),
        None,
        hash_password("AdminPass123").unwrap(),
    );
    let other_admin = h.users.seed(other_admin).await;

    let err = h
        .service
        .admin_delete_user(&admin_principal(admin.id), &other_admin.uuid)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::AdminAccountProtected)
    ));
}

#[tokio::test]
async fn test_admin_can_delete_regular_user() {
    let h = harness();
    let admin = seed_admin(&h).await;
    let (user, _) = h.service.register(new_account("a@b.com")).await.unwrap();

    h.service
        .admin_delete_user(&admin_principal(admin.id), &user.uuid)
        .await
        .unwrap();

    assert!(h.users.find_by_id(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_admin_cannot_update_own_account() {
    let h = harness();
    let admin = seed_admin(&h).await;

    let err = h
        .service
        .admin_update_user(
            &admin_principal(admin.id),
            &admin.uuid,
            AdminUserUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::SelfActionForbidden)
    ));
}

#[tokio::test]
async fn test_admin_update_applies_changes() {
    let h = harness();
    let admin = seed_admin(&h).await;
    let (user, _) = h.service.register(new_account("a@b.com")).await.unwrap();

    let updated = h
        .service
        .admin_update_user(
            &admin_principal(admin.id),
            &user.uuid,
            AdminUserUpdate {
                first_name: Some("Johnny".to_string()),
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Johnny");
    assert!(!updated.active);

    // A disabled account can no longer log in.
    assert!(h.service.login("a@b.com", "Password123").await.is_err());
}

#[tokio::test]
async fn test_admin_update_duplicate_email_rejected() {
    let h = harness();
    let admin = seed_admin(&h).await;
    h.service.register(new_account("a@b.com")).await.unwrap();
    let (second, _) = h.service.register(new_account("b@b.com")).await.unwrap();

    let err = h
        .service
        .admin_update_user(
            &admin_principal(admin.id),
            &second.uuid,
            AdminUserUpdate {
                email: Some("a@b.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::DuplicateEmail)));
}

#[tokio::test]
async fn test_get_profile() {
    let h = harness();
    let (user, _) = h.service.register(new_account("a@b.com")).await.unwrap();

    let profile = h.service.get_profile(user.id).await.unwrap();
    assert_eq!(profile.email, "a@b.com");

    let err = h.service.get_profile(9999).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
