//! Typed secret handlers, one instantiation per record kind.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Serialize;
use serde::de::DeserializeOwned;
use vault_core::models::secret::Secret;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    DeletedResponse, SaveSecretRequest, SavedResponse, SecretListResponse, SecretResponse,
};

/// `POST /api/data/<kind>/{label}`: create or replace.
pub async fn save_secret<T>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(label): Path<String>,
    body: Result<Json<SaveSecretRequest<T>>, JsonRejection>,
) -> AppResult<Json<SavedResponse>>
where
    T: Secret + DeserializeOwned,
{
    let Json(body) = body?;
    state
        .records
        .save(&user.login, &label, body.data, &body.metadata)
        .await?;
    Ok(Json(SavedResponse {
        label,
        kind: T::KIND,
    }))
}

/// `GET /api/data/<kind>/{label}`
pub async fn get_secret<T>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(label): Path<String>,
) -> AppResult<Json<SecretResponse<T>>>
where
    T: Secret + Serialize,
{
    let (data, metadata) = state.records.get::<T>(&user.login, &label).await?;
    Ok(Json(SecretResponse {
        label,
        kind: T::KIND,
        data,
        metadata,
    }))
}

/// `DELETE /api/data/<kind>/{label}`
pub async fn delete_secret<T: Secret>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(label): Path<String>,
) -> AppResult<Json<DeletedResponse>> {
    state.records.delete(&user.login, &label, T::KIND).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}

/// `GET /api/data/<kind>`: labels, metadata and timestamps, no payloads.
pub async fn list_secrets<T: Secret>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<SecretListResponse>> {
    let items = state.records.list(&user.login, T::KIND).await?;
    Ok(Json(SecretListResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
