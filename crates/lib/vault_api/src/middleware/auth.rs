//! Authentication middleware: Bearer token verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use vault_core::auth::identity::resolve_login;

use crate::AppState;
use crate::error::AppError;

/// Identity attached to request extensions once the token checks out.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub login: String,
}

/// Axum middleware: verifies `Authorization: Bearer <token>` and injects
/// `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let login = resolve_login(header, state.config.jwt_secret.as_bytes()).map_err(|e| {
        debug!(error = %e, "bearer token rejected");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(AuthenticatedUser { login });
    Ok(next.run(request).await)
}
