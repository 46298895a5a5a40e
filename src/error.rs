//!
//! # Custom Error Handling
//!
//! `AppError` is the single error type returned by services and handlers.
//! It implements `actix_web::error::ResponseError`, so a handler can simply
//! return `Err(..)` and the client gets the matching response: the
//! recoverable, user-facing failures become redirects back to the right form,
//! everything else becomes an HTML error page.
//!
//! Storage failures fail the current request only; details go to the log, the
//! client sees a generic message.

use actix_web::{
    error::ResponseError,
    http::{header, StatusCode},
    HttpResponse,
};
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;
use crate::views;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Signup with a username that already exists.
    DuplicateUsername,
    /// Unknown user or wrong password; the two are never told apart.
    AuthenticationFailed,
    /// No valid session on a route that needs one.
    Unauthenticated,
    /// Input that failed form validation (HTTP 422).
    ValidationError(String),
    BadRequest(String),
    NotFound(String),
    /// A store operation failed (HTTP 500).
    Storage(StoreError),
    /// Any other unexpected server-side error (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateUsername => write!(f, "Username already taken"),
            AppError::AuthenticationFailed => write!(f, "Invalid username or password"),
            AppError::Unauthenticated => write!(f, "Not logged in"),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Storage(err) => write!(f, "Storage Error: {}", err),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Redirect to `location`, the way every form POST in the app finishes.
pub fn redirect(status: StatusCode, location: &str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::LOCATION, location))
        .finish()
}

fn html_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(views::error_page(status.as_u16(), message))
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername | AppError::AuthenticationFailed => StatusCode::SEE_OTHER,
            AppError::Unauthenticated => StatusCode::FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::DuplicateUsername => redirect(status, "/signup?error=taken"),
            AppError::AuthenticationFailed => redirect(status, "/login?error=invalid"),
            AppError::Unauthenticated => redirect(status, "/login"),
            AppError::ValidationError(_) | AppError::BadRequest(_) | AppError::NotFound(_) => {
                html_error(status, &self.to_string())
            }
            AppError::Storage(_) | AppError::InternalServerError(_) => {
                log::error!("request failed: {}", self);
                html_error(status, "Something went wrong. Please try again later.")
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::Storage(error)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Token encoding only fails on a broken key or claims, never on client input.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InternalServerError(format!("Failed to sign session: {}", error))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
