//! Translation of domain errors into HTTP responses.
//!
//! Every authentication and authorization failure is caught here and
//! mapped to a generic external message. Internal detail (which query,
//! which constraint) goes to the log and nowhere else.

use actix_web::HttpResponse;
use std::collections::HashMap;

use am_core::errors::{AuthError, DomainError, TokenError};

use crate::dto::ErrorResponse;

/// Convert a domain error to the appropriate HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("bad_request", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ErrorResponse::new("not_found", format!("{} not found", resource)),
        ),
        DomainError::Unauthorized => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("unauthorized", "Unauthorized")),
        DomainError::Forbidden { reason } => {
            HttpResponse::Forbidden().json(ErrorResponse::new("forbidden", reason))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "Internal server error",
            ))
        }
    }
}

fn handle_auth_error(error: AuthError) -> HttpResponse {
    match error {
        AuthError::InvalidCredentials => HttpResponse::Unauthorized().json(
            ErrorResponse::new("invalid_credentials", "Invalid email or password"),
        ),
        AuthError::DuplicateEmail => {
            let mut details = HashMap::new();
            details.insert(
                "email".to_string(),
                vec!["The email is already taken.".to_string()],
            );
            HttpResponse::UnprocessableEntity().json(
                ErrorResponse::new("duplicate_email", "The email is already taken")
                    .with_details(details),
            )
        }
        AuthError::AdminRequired => HttpResponse::Forbidden()
            .json(ErrorResponse::new("forbidden", "Admin access required")),
        AuthError::SelfActionForbidden => HttpResponse::Forbidden().json(ErrorResponse::new(
            "forbidden",
            "Cannot modify your own account via the admin surface",
        )),
        AuthError::AdminAccountProtected => HttpResponse::Forbidden().json(
            ErrorResponse::new("forbidden", "Cannot delete admin accounts"),
        ),
    }
}

fn handle_token_error(error: TokenError) -> HttpResponse {
    match error {
        // Reset token outcomes keep their distinction: the token itself
        // already proves a credential, so nothing is enumerable here.
        TokenError::Invalid => HttpResponse::BadRequest().json(ErrorResponse::new(
            "invalid_token",
            "Invalid or expired reset token",
        )),
        TokenError::AlreadyUsed => HttpResponse::BadRequest().json(ErrorResponse::new(
            "token_already_used",
            "Reset token has already been used",
        )),
        // Every access token defect collapses to the same 401.
        TokenError::Expired
        | TokenError::NotYetValid
        | TokenError::InvalidFormat
        | TokenError::InvalidSignature => HttpResponse::Unauthorized().json(
            ErrorResponse::new("unauthorized", "Invalid or expired token"),
        ),
        TokenError::GenerationFailed => {
            log::error!("Token generation failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "Internal server error",
            ))
        }
    }
}

/// Convert validator failures into the 422 field-error response
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut details: HashMap<String, Vec<String>> = HashMap::new();

    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}.", field))
            })
            .collect();
        details.insert(field.to_string(), messages);
    }

    HttpResponse::UnprocessableEntity().json(
        ErrorResponse::new("validation_error", "Invalid request data").with_details(details),
    )
}
