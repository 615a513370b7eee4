//! Handler for POST /api/v1/auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponse, LoginRequest, UserData};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::routes::AppState;

/// Authenticates an account by email and password
///
/// Unknown email, inactive account, and wrong password all produce the
/// same 401 body.
pub async fn login<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: PasswordResetRepository + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .account_service
        .login(&request.email, &request.password)
        .await
    {
        Ok((user, token)) => HttpResponse::Ok().json(AuthResponse {
            message: "Login successful.".to_string(),
            user: UserData::from(&user),
            token,
        }),
        Err(error) => handle_domain_error(error),
    }
}
