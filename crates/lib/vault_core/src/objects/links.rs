//! Time-boxed upload/download links.

use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use super::{ObjectStore, ObjectStoreError, PresignMethod, PresignedUrl};

/// Every link is valid for 15 minutes from issuance.
pub const LINK_TTL_SECS: i64 = 15 * 60;

/// Issues presigned links. Metadata only: no object bytes pass through here.
#[derive(Clone)]
pub struct ObjectLinkService {
    store: Arc<dyn ObjectStore>,
}

impl ObjectLinkService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Write-capable URL for `key` (single PUT target).
    pub async fn issue_upload_link(&self, key: &str) -> Result<PresignedUrl, ObjectStoreError> {
        self.issue(PresignMethod::Put, key).await
    }

    /// Read-capable URL for `key`.
    pub async fn issue_download_link(&self, key: &str) -> Result<PresignedUrl, ObjectStoreError> {
        self.issue(PresignMethod::Get, key).await
    }

    async fn issue(&self, method: PresignMethod, key: &str) -> Result<PresignedUrl, ObjectStoreError> {
        let link = self
            .store
            .presign(method, key, Duration::seconds(LINK_TTL_SECS))
            .await?;
        debug!(%method, key, expires_at = %link.expires_at, "issued object link");
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::s3::{S3Config, S3Presigner};

    fn service() -> ObjectLinkService {
        let presigner = S3Presigner::new(S3Config {
            endpoint: "http://127.0.0.1:9000".into(),
            region: "us-east-1".into(),
            bucket: "vault".into(),
            access_key_id: "id".into(),
            secret_access_key: "secret".into(),
            path_style: None,
        })
        .unwrap();
        ObjectLinkService::new(Arc::new(presigner))
    }

    #[tokio::test]
    async fn links_last_fifteen_minutes() {
        let links = service();
        let up = links.issue_upload_link("o/report.pdf").await.unwrap();
        let down = links.issue_download_link("o/report.pdf").await.unwrap();

        assert_eq!(up.method, PresignMethod::Put);
        assert_eq!(down.method, PresignMethod::Get);
        for link in [&up, &down] {
            assert_eq!(link.expires_at - link.issued_at, Duration::minutes(15));
            assert_eq!(link.key, "o/report.pdf");
        }
    }
}
