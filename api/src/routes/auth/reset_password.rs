//! Handler for POST /api/v1/auth/reset-password

use actix_web::{web, HttpResponse};
use validator::Validate;

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::email::EmailSender;

use crate::dto::auth::{MessageResponse, ResetPasswordRequest};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::routes::AppState;

/// Completes a password reset with a token from the reset email
///
/// # Responses
/// - 200: password rotated
/// - 400: token unknown, expired, or already used
/// - 422: new password fails the policy
pub async fn reset_password<U, R, E>(
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(&request.token, &request.password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "Password has been reset successfully. You can now login with your new password."
                .to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
