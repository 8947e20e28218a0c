use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::dummy::errors::DummyError;
use crate::domain::files::errors::FileError;

pub mod current_account;
pub mod disable_account;
pub mod dummies;
pub mod files;
pub mod login;
pub mod register_account;

/// Generic 401 message. Everything identity-related produces exactly this
/// body so callers cannot distinguish a bad token from an unknown user.
pub const UNAUTHORIZED_MESSAGE: &str = "Could not validate credentials";

/// Generic login failure message, identical for unknown usernames and
/// wrong passwords.
pub const BAD_LOGIN_MESSAGE: &str = "Incorrect username or password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    UnprocessableEntity(String),
    ServiceUnavailable(String),
    InternalServerError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ApiErrorBody { message });

        // Every 401 carries the Bearer challenge
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized(BAD_LOGIN_MESSAGE.to_string())
            }
            AccountError::InvalidToken(_) => {
                ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            AccountError::Inactive => ApiError::BadRequest("Inactive user".to_string()),
            AccountError::PasswordMismatch => {
                ApiError::Forbidden("Incorrect password".to_string())
            }
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::UsernameTaken(_) | AccountError::EmailTaken(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidUsername(_) | AccountError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AccountError::Password(auth::PasswordError::EmptyPassword) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AccountError::Password(_) | AccountError::Token(_) | AccountError::Database(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<DummyError> for ApiError {
    fn from(err: DummyError) -> Self {
        match err {
            DummyError::NotFound(_) => ApiError::NotFound(err.to_string()),
            DummyError::NameTaken(_) => ApiError::Conflict(err.to_string()),
            DummyError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::UnsupportedExtension | FileError::InvalidFilename(_) => {
                ApiError::BadRequest(err.to_string())
            }
            FileError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
            FileError::NotFound(_) => ApiError::NotFound(err.to_string()),
            FileError::Storage(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}
