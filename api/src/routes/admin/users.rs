//! Admin user management handlers.

use actix_web::{web, HttpResponse};
use validator::Validate;

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::account::AdminUserUpdate;
use am_core::services::email::EmailSender;

use crate::dto::auth::{AdminUpdateUserRequest, AdminUserData, AdminUserResponse, MessageResponse};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::CurrentUser;
use crate::routes::AppState;

/// Handler for PUT /api/v1/admin/users/{uuid}
///
/// # Responses
/// - 200: user updated
/// - 403: target is the caller's own account
/// - 404: no such user
/// - 422: duplicate email
pub async fn update_user<U, R, E>(
    user: CurrentUser,
    path: web::Path<String>,
    state: web::Data<AppState<U, R, E>>,
    request: web::Json<AdminUpdateUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: PasswordResetRepository + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let update = AdminUserUpdate {
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        email: request.email.clone(),
        phone: request.phone.clone(),
        role_id: request.role_id,
        active: request.active,
    };

    match state
        .account_service
        .admin_update_user(&user.0, &path, update)
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(AdminUserResponse {
            message: "User updated successfully".to_string(),
            user: AdminUserData::from(&updated),
        }),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/admin/users/{uuid}
///
/// # Responses
/// - 200: user deleted
/// - 403: target is the caller's own account, or holds the admin role
/// - 404: no such user
pub async fn delete_user<U, R, E>(
    user: CurrentUser,
    path: web::Path<String>,
    state: web::Data<AppState<U, R, E>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: PasswordResetRepository + 'static,
    E: EmailSender + 'static,
{
    match state
        .account_service
        .admin_delete_user(&user.0, &path)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "User deleted successfully".to_string(),
        }),
        Err(error) => handle_domain_error(error),
    }
}
