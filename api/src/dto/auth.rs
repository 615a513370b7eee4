//! DTOs for authentication and account management endpoints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use am_core::domain::entities::user::User;
use am_shared::utils::validation::is_strong_password;

/// Validate a password against the account password policy
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(ValidationError::new("strong_password"))
    }
}

/// Validate that the terms checkbox was actually checked
fn validate_accepted_terms(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(ValidationError::new("accepted_terms"))
    }
}

/// Registration request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Must be at least 2 characters."))]
    pub first_name: String,

    #[validate(length(min = 2, message = "Must be at least 2 characters."))]
    pub last_name: String,

    #[validate(email(message = "Must be a valid email address."))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[validate(custom(
        function = "validate_password_strength",
        message = "Must be at least 8 characters long and contain both letters and digits."
    ))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub password_confirmation: String,

    #[validate(custom(
        function = "validate_accepted_terms",
        message = "You must accept the terms and conditions."
    ))]
    pub accepted_terms: bool,
}

/// Login request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Must be a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
}

/// Forgot password request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Must be a valid email address."))]
    pub email: String,
}

/// Reset password request payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "This field is required."))]
    pub token: String,

    #[validate(custom(
        function = "validate_password_strength",
        message = "Must be at least 8 characters long and contain both letters and digits."
    ))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub password_confirmation: String,
}

/// User information exposed on authentication responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: u64,
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            uuid: user.uuid.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Successful registration or login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserData,
    pub token: String,
}

/// Generic message-only response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Profile response for the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user: UserData,
}

/// User information exposed on admin responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserData {
    pub id: u64,
    pub uuid: String,
    pub role_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for AdminUserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            uuid: user.uuid.clone(),
            role_id: user.role_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Admin update request payload; absent fields stay untouched
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    pub first_name: Option<String>,

    pub last_name: Option<String>,

    #[validate(email(message = "Must be a valid email address."))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub role_id: Option<u64>,

    pub active: Option<bool>,
}

/// Admin update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserResponse {
    pub message: String,
    pub user: AdminUserData,
}
