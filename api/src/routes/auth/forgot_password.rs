//! Handler for POST /api/v1/auth/forgot-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::email::EmailSender;

use crate::dto::auth::{ForgotPasswordRequest, MessageResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::routes::AppState;

const GENERIC_MESSAGE: &str = "If the email exists, a password reset link has been sent.";

/// Starts the password reset flow
///
/// The response is identical whether or not the address belongs to an
/// account; only an infrastructure failure changes the outcome.
pub async fn forgot_password<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: PasswordResetRepository + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.account_service.forgot_password(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: GENERIC_MESSAGE.to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
