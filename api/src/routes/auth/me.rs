//! Handler for GET /api/v1/auth/me

use actix_web::{web, HttpResponse};

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::email::EmailSender;

use crate::dto::auth::{UserData, UserProfileResponse};
use crate::handlers::handle_domain_error;
use crate::middleware::CurrentUser;
use crate::routes::AppState;

/// Returns the authenticated user's profile
pub async fn me<U, R, E>(
    user: CurrentUser,
    state: web::Data<AppState<U, R, E>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: PasswordResetRepository + 'static,
    E: EmailSender + 'static,
{
    match state.account_service.get_profile(user.0.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(UserProfileResponse {
            user: UserData::from(&profile),
        }),
        Err(error) => handle_domain_error(error),
    }
}
