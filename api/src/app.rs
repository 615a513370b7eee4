//! Application factory
//!
//! Builds the Actix application with all middleware and routes wired.
//! Generic over the storage and email collaborators so tests can run the
//! real HTTP surface against in-memory implementations.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use am_core::repositories::{PasswordResetRepository, UserRepository};
use am_core::services::email::EmailSender;
use am_shared::config::Environment;

use crate::dto::ErrorResponse;
use crate::middleware::cors::create_cors;
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::routes::admin::{delete_user, update_user};
use crate::routes::auth::{forgot_password, login, me, register, reset_password};
use crate::routes::AppState;

/// Create and configure the application with all dependencies
pub fn create_app<U, R, E>(
    app_state: web::Data<AppState<U, R, E>>,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: PasswordResetRepository + 'static,
    E: EmailSender + 'static,
{
    let token_service = app_state.token_service.clone();
    let cors = create_cors(environment);

    App::new()
        .app_data(app_state)
        .app_data(json_config())
        // Middleware (order matters: CORS first, then request logging)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, R, E>))
                        .route("/login", web::post().to(login::<U, R, E>))
                        .route(
                            "/forgot-password",
                            web::post().to(forgot_password::<U, R, E>),
                        )
                        .route(
                            "/reset-password",
                            web::post().to(reset_password::<U, R, E>),
                        )
                        .service(
                            web::resource("/me")
                                .wrap(RequireAuth::new(token_service.clone()))
                                .route(web::get().to(me::<U, R, E>)),
                        ),
                )
                .service(
                    // Wraps execute bottom-up: RequireAuth populates the
                    // principal before RequireAdmin checks it.
                    web::scope("/admin")
                        .wrap(RequireAdmin::new())
                        .wrap(RequireAuth::new(token_service))
                        .route("/users/{uuid}", web::put().to(update_user::<U, R, E>))
                        .route("/users/{uuid}", web::delete().to(delete_user::<U, R, E>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// JSON extractor configuration: malformed bodies get the standard 400
/// shape instead of the framework default
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::new("bad_request", "Invalid request payload"));
        InternalError::from_response(err, response).into()
    })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "automart-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
