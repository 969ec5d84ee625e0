//! Authentication: password hashing, token issuance, bearer identity
//! resolution, and the Postgres credential repository.

pub mod identity;
pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

use crate::store::StoreError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    CredentialError,

    #[error("authorization header must use the Bearer scheme")]
    MissingScheme,

    #[error("token could not be parsed: {0}")]
    ParseFailure(String),

    #[error("token rejected: {0}")]
    InvalidToken(String),

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("login '{0}' is already registered")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}
