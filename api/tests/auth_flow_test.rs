//! End-to-end tests for the authentication surface, running the real
//! application against in-memory repositories and a recording email
//! sender.

use actix_web::{http::header, test, web};
use serde_json::{json, Value};
use std::sync::Arc;

use am_api::app::create_app;
use am_api::routes::AppState;
use am_core::domain::entities::user::{User, ADMIN_ROLE_ID};
use am_core::repositories::{MockPasswordResetRepository, MockUserRepository};
use am_core::services::account::{AccountService, AccountServiceConfig};
use am_core::services::email::MockEmailSender;
use am_core::services::password::hash_password;
use am_core::services::reset::PasswordResetService;
use am_core::services::token::{TokenService, TokenServiceConfig};
use am_shared::config::Environment;

type TestState = AppState<MockUserRepository, MockPasswordResetRepository, MockEmailSender>;

struct Harness {
    state: web::Data<TestState>,
    users: Arc<MockUserRepository>,
    email: Arc<MockEmailSender>,
    tokens: Arc<TokenService>,
}

fn harness() -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let reset_tokens = Arc::new(MockPasswordResetRepository::new());
    let email = Arc::new(MockEmailSender::new());
    let tokens = Arc::new(
        TokenService::new(TokenServiceConfig::new("api-tests-secret-0123456789ab")).unwrap(),
    );

    let account_service = Arc::new(AccountService::new(
        users.clone(),
        PasswordResetService::new(reset_tokens),
        email.clone(),
        tokens.clone(),
        AccountServiceConfig::default(),
    ));

    Harness {
        state: web::Data::new(AppState {
            account_service,
            token_service: tokens.clone(),
        }),
        users,
        email,
        tokens,
    }
}

fn register_body(email: &str) -> Value {
    json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": email,
        "password": "Password123",
        "password_confirmation": "Password123",
        "accepted_terms": true,
    })
}

async fn seed_admin(h: &Harness) -> (User, String) {
    let admin = User::new(
        ADMIN_ROLE_ID,
        "Root".to_string(),
        "Admin".to_string(),
        "admin@automart.example".to_string(),
        None,
        hash_password("AdminPass123").unwrap(),
    );
    let admin = h.users.seed(admin).await;
    let token = h
        .tokens
        .issue(admin.id, &admin.email, admin.role_id)
        .unwrap();
    (admin, token)
}

#[actix_rt::test]
async fn test_full_account_lifecycle() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;

    // Register -> 201 with a token.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("a@b.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["token"].as_str().unwrap().len() > 20);
    assert_eq!(body["user"]["email"], "a@b.com");

    // Register again with the same email -> 422.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("a@b.com"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 422);

    // Login with a wrong password -> 401.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "a@b.com", "password": "wrong"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // Forgot password -> 200 with the generic message, one email dispatched.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/forgot-password")
            .set_json(json!({"email": "a@b.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let sent = h.email.sent_messages().await;
    assert_eq!(sent.len(), 1);
    let reset_token = sent[0].1.clone();

    // Reset password with that token -> 200.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/reset-password")
            .set_json(json!({
                "token": reset_token,
                "password": "NewPassword456",
                "password_confirmation": "NewPassword456",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // Old password -> 401; new password -> 200.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "a@b.com", "password": "Password123"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "a@b.com", "password": "NewPassword456"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // The reset token is single-use: a second redemption -> 400.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/reset-password")
            .set_json(json!({
                "token": reset_token,
                "password": "Another789pass",
                "password_confirmation": "Another789pass",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_forgot_password_is_generic_for_unknown_email() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/forgot-password")
            .set_json(json!({"email": "ghost@b.com"}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 200);
    assert!(h.email.sent_messages().await.is_empty());
}

#[actix_rt::test]
async fn test_me_requires_authentication() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;

    // No header.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Authorization header required");

    // Malformed scheme.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header((header::AUTHORIZATION, "Token abc"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid authorization header format");

    // Garbage token.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header((header::AUTHORIZATION, "Bearer garbage"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[actix_rt::test]
async fn test_me_returns_profile_with_valid_token() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("a@b.com"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "a@b.com");
}

#[actix_rt::test]
async fn test_admin_routes_reject_non_admin() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;

    // A regular registration gets the default role, not admin.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("a@b.com"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    let uuid = body["user"]["uuid"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/users/{}", uuid))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Admin access required");
}

#[actix_rt::test]
async fn test_admin_can_delete_regular_user_but_not_self_or_admins() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;
    let (admin, admin_token) = seed_admin(&h).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("a@b.com"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let user_uuid = body["user"]["uuid"].as_str().unwrap().to_string();

    // Deleting own account through the admin surface -> 403.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/users/{}", admin.uuid))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", admin_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // Deleting a regular user -> 200.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/users/{}", user_uuid))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", admin_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // Deleting an unknown user -> 404.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/admin/users/no-such-uuid")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", admin_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_admin_update_disables_account() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;
    let (_, admin_token) = seed_admin(&h).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(register_body("a@b.com"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    let user_uuid = body["user"]["uuid"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/admin/users/{}", user_uuid))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", admin_token)))
            .set_json(json!({"active": false}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // The disabled account now fails login with the same message as a
    // wrong password.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "a@b.com", "password": "Password123"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[actix_rt::test]
async fn test_malformed_json_body_is_400() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_register_validation_failure_is_422_with_field_errors() {
    let h = harness();
    let app =
        test::init_service(create_app(h.state.clone(), Environment::Development)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "first_name": "J",
                "last_name": "Doe",
                "email": "not-an-email",
                "password": "short",
                "password_confirmation": "short",
                "accepted_terms": false,
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    let details = body["details"].as_object().unwrap();
    assert!(details.contains_key("first_name"));
    assert!(details.contains_key("email"));
    assert!(details.contains_key("password"));
    assert!(details.contains_key("accepted_terms"));
}
