//! File metadata handlers. Object bytes never pass through the API; clients
//! PUT/GET them directly against the presigned URLs.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    DeletedResponse, DownloadFileQuery, DownloadFileResponse, UploadFileRequest,
    UploadFileResponse,
};

/// `POST /api/file/upload`
pub async fn upload_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<UploadFileRequest>, JsonRejection>,
) -> AppResult<Json<UploadFileResponse>> {
    let Json(body) = body?;
    let upload = state
        .files
        .upload(&user.login, &body.name, &body.extension, &body.metadata)
        .await?;
    Ok(Json(UploadFileResponse {
        name: body.name,
        object_key: upload.object_key,
        upload_url: upload.link.url.to_string(),
        expires_at: upload.link.expires_at,
    }))
}

/// `GET /api/file/download?name=<name>`
pub async fn download_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    query: Result<Query<DownloadFileQuery>, QueryRejection>,
) -> AppResult<Json<DownloadFileResponse>> {
    let Query(query) = query?;
    let download = state.files.download(&user.login, &query.name).await?;
    Ok(Json(DownloadFileResponse {
        file_name: download.file.file_name,
        extension: download.file.extension,
        metadata: download.metadata,
        object_key: download.object_key,
        download_url: download.link.url.to_string(),
        expires_at: download.link.expires_at,
    }))
}

/// `DELETE /api/file/{name}`
pub async fn delete_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(name): Path<String>,
) -> AppResult<Json<DeletedResponse>> {
    state.files.delete(&user.login, &name).await?;
    Ok(Json(DeletedResponse { deleted: true }))
}
