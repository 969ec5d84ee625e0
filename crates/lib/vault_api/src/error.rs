//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use vault_core::auth::AuthError;
use vault_core::files::FileError;
use vault_core::records::RecordError;
use vault_core::store::StoreError;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Internal(detail) => {
                error!(detail = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound("row not found".into()),
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::Db(e) => AppError::from(e),
            StoreError::Corrupt(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::MissingScheme
            | AuthError::ParseFailure(_)
            | AuthError::InvalidToken(_)
            | AuthError::MalformedToken(_) => AppError::Unauthorized(e.to_string()),
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::Conflict(_) => AppError::Conflict(e.to_string()),
            AuthError::Store(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RecordError> for AppError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::UserNotFound(_) | RecordError::NotFound { .. } => {
                AppError::NotFound(e.to_string())
            }
            RecordError::InvalidLabel(_) | RecordError::Encoding { .. } => {
                AppError::Validation(e.to_string())
            }
            RecordError::Storage {
                source: StoreError::Conflict(_),
                ..
            } => AppError::Conflict(e.to_string()),
            RecordError::UserLookup { .. }
            | RecordError::Decoding { .. }
            | RecordError::Storage { .. } => AppError::Internal(e.to_string()),
        }
    }
}

impl From<FileError> for AppError {
    fn from(e: FileError) -> Self {
        match e {
            FileError::Record(e) => AppError::from(e),
            FileError::InvalidExtension(_) | FileError::InvalidName(_) => {
                AppError::Validation(e.to_string())
            }
            FileError::Link { .. } => AppError::Internal(e.to_string()),
        }
    }
}
