//! Object storage indirection.
//!
//! Large payloads never pass through the service: callers get a short-lived
//! presigned URL and talk to the object store directly.

pub mod links;
pub mod s3;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use url::Url;

/// Object storage errors. Surfaced verbatim; there is no retry.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("object store configuration error: {0}")]
    Configuration(String),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("object store backend error: {0}")]
    Backend(String),
}

/// HTTP method a presigned URL is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresignMethod {
    Get,
    Put,
}

impl PresignMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PresignMethod::Get => "GET",
            PresignMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for PresignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A capability URL for one method on one object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedUrl {
    pub url: Url,
    pub method: PresignMethod,
    pub key: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Anything that can mint presigned URLs for a bucket it was configured with.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn presign(
        &self,
        method: PresignMethod,
        key: &str,
        ttl: Duration,
    ) -> Result<PresignedUrl, ObjectStoreError>;
}
