//! Handler for POST /api/v1/auth/register

use actix_web::{web, HttpResponse};
use validator::Validate;

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::account::NewAccount;
use am_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponse, RegisterRequest, UserData};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::routes::AppState;

/// Registers a new account and returns it with a fresh access token
///
/// # Responses
/// - 201: account created
/// - 422: validation failure or duplicate email
/// - 500: storage or hashing failure
pub async fn register<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: PasswordResetRepository + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let account = NewAccount {
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        password: request.password.clone(),
    };

    match state.account_service.register(account).await {
        Ok((user, token)) => HttpResponse::Created().json(AuthResponse {
            message: "Account created successfully.".to_string(),
            user: UserData::from(&user),
            token,
        }),
        Err(error) => handle_domain_error(error),
    }
}
