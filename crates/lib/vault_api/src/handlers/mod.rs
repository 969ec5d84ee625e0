//! Request handlers.

pub mod auth;
pub mod data;
pub mod file;

use axum::extract::rejection::{JsonRejection, QueryRejection};

use crate::error::AppError;

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}
