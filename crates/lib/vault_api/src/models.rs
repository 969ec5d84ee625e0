//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vault_core::models::record::{RecordKind, RecordSummary};

/// Error body returned by every failing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub login: String,
}

/// Body of `POST /api/data/<kind>/<label>`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSecretRequest<T> {
    pub data: T,
    #[serde(default)]
    pub metadata: String,
}

/// A decoded secret with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretResponse<T> {
    pub label: String,
    pub kind: RecordKind,
    pub data: T,
    pub metadata: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretSummary {
    pub label: String,
    pub kind: RecordKind,
    pub metadata: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecordSummary> for SecretSummary {
    fn from(s: RecordSummary) -> Self {
        Self {
            label: s.label,
            kind: s.kind,
            metadata: s.metadata,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretListResponse {
    pub items: Vec<SecretSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResponse {
    pub label: String,
    pub kind: RecordKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadFileRequest {
    pub name: String,
    pub extension: String,
    #[serde(default)]
    pub metadata: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileResponse {
    pub name: String,
    pub object_key: String,
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadFileQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFileResponse {
    pub file_name: String,
    pub extension: String,
    pub metadata: String,
    pub object_key: String,
    #[serde(rename = "downloadURL")]
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
}
