//! File records: metadata in the record store, bytes in object storage.
//!
//! A file record is a [`FileMetadata`] stub whose object lives under a key
//! derived from owner, name and extension, so repeated uploads to the same
//! name overwrite the same remote object.

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::record::RecordKind;
use crate::models::secret::FileMetadata;
use crate::objects::links::ObjectLinkService;
use crate::objects::{ObjectStoreError, PresignedUrl};
use crate::records::service::RecordService;
use crate::records::{RecordError, validate_label};

const MAX_EXTENSION_LEN: usize = 16;

/// File flow errors.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("object link for '{name}' failed: {source}")]
    Link {
        name: String,
        #[source]
        source: ObjectStoreError,
    },

    #[error("invalid file extension: {0}")]
    InvalidExtension(String),

    #[error("invalid file name: {0}")]
    InvalidName(String),
}

/// Result of an upload request: where to PUT the bytes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub object_key: String,
    pub link: PresignedUrl,
}

/// Result of a download request: stored metadata plus a fresh GET link.
#[derive(Debug, Clone)]
pub struct FileDownload {
    pub file: FileMetadata,
    pub metadata: String,
    pub object_key: String,
    pub link: PresignedUrl,
}

/// Object key for a file: `<owner-id>/<name>.<extension>`.
pub fn object_key(owner_id: Uuid, name: &str, extension: &str) -> String {
    format!("{owner_id}/{name}.{extension}")
}

/// File names are labels that also form a single object-key segment under
/// the owner's prefix: no path separators, not `.` or `..`.
pub fn validate_file_name(name: &str) -> Result<(), FileError> {
    validate_label(name)?;
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(FileError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Extensions are short ASCII alphanumerics; a leading dot is dropped.
pub fn normalize_extension(extension: &str) -> Result<String, FileError> {
    let ext = extension.strip_prefix('.').unwrap_or(extension);
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(FileError::InvalidExtension(extension.to_string()));
    }
    Ok(ext.to_ascii_lowercase())
}

#[derive(Clone)]
pub struct FileService {
    records: RecordService,
    links: ObjectLinkService,
}

impl FileService {
    pub fn new(records: RecordService, links: ObjectLinkService) -> Self {
        Self { records, links }
    }

    /// Issue an upload link for `name.extension` and record its metadata.
    pub async fn upload(
        &self,
        login: &str,
        name: &str,
        extension: &str,
        metadata: &str,
    ) -> Result<FileUpload, FileError> {
        validate_file_name(name)?;
        let extension = normalize_extension(extension)?;
        let owner = self.records.resolve_owner(login).await?;

        let key = object_key(owner.id, name, &extension);
        let link = self
            .links
            .issue_upload_link(&key)
            .await
            .map_err(|source| FileError::Link {
                name: name.to_string(),
                source,
            })?;

        let file = FileMetadata {
            file_name: name.to_string(),
            extension,
            external_url: link.url.to_string(),
        };
        self.records.save(login, name, file, metadata).await?;

        info!(login, name, key = %key, "file upload link issued");
        Ok(FileUpload {
            object_key: key,
            link,
        })
    }

    /// Read the file record for `name` and issue a fresh download link.
    pub async fn download(&self, login: &str, name: &str) -> Result<FileDownload, FileError> {
        let (file, metadata) = self.records.get::<FileMetadata>(login, name).await?;
        let owner = self.records.resolve_owner(login).await?;

        let key = object_key(owner.id, &file.file_name, &file.extension);
        let link = self
            .links
            .issue_download_link(&key)
            .await
            .map_err(|source| FileError::Link {
                name: name.to_string(),
                source,
            })?;

        Ok(FileDownload {
            file,
            metadata,
            object_key: key,
            link,
        })
    }

    /// Remove the file record. The remote object is left in place.
    pub async fn delete(&self, login: &str, name: &str) -> Result<(), FileError> {
        self.records.delete(login, name, RecordKind::File).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Duration;

    use super::*;
    use crate::objects::s3::{S3Config, S3Presigner};
    use crate::objects::{ObjectStore, PresignMethod};
    use crate::store::UserStore;
    use crate::store::memory::{MemoryRecordStore, MemoryUserStore};

    struct UnreachableStore;

    #[async_trait]
    impl ObjectStore for UnreachableStore {
        async fn presign(
            &self,
            _method: PresignMethod,
            _key: &str,
            _ttl: Duration,
        ) -> Result<PresignedUrl, ObjectStoreError> {
            Err(ObjectStoreError::Backend("connection refused".into()))
        }
    }

    async fn setup(store: Arc<dyn ObjectStore>) -> (FileService, Arc<MemoryUserStore>) {
        let users = Arc::new(MemoryUserStore::new());
        users.create_user("alice", "hash").await.unwrap();
        users.create_user("bob", "hash").await.unwrap();
        let records = RecordService::new(users.clone(), Arc::new(MemoryRecordStore::new()));
        (
            FileService::new(records, ObjectLinkService::new(store)),
            users,
        )
    }

    fn presigner() -> S3Presigner {
        S3Presigner::new(S3Config {
            endpoint: "http://localhost:9000".into(),
            region: "us-east-1".into(),
            bucket: "vault".into(),
            access_key_id: "id".into(),
            secret_access_key: "secret".into(),
            path_style: None,
        })
        .unwrap()
    }

    fn real() -> Arc<dyn ObjectStore> {
        Arc::new(presigner())
    }

    #[tokio::test]
    async fn upload_records_metadata_and_issues_put_link() {
        let (files, users) = setup(real()).await;
        let owner = users.find_user("alice").await.unwrap();

        let upload = files.upload("alice", "report", "pdf", "q3").await.unwrap();
        assert_eq!(upload.object_key, format!("{}/report.pdf", owner.id));
        assert_eq!(upload.link.method, PresignMethod::Put);
        assert_eq!(
            upload.link.expires_at - upload.link.issued_at,
            Duration::minutes(15)
        );

        let download = files.download("alice", "report").await.unwrap();
        assert_eq!(download.file.file_name, "report");
        assert_eq!(download.file.extension, "pdf");
        assert_eq!(download.file.external_url, upload.link.url.to_string());
        assert_eq!(download.metadata, "q3");
        assert_eq!(download.object_key, upload.object_key);
        assert_eq!(download.link.method, PresignMethod::Get);
    }

    #[tokio::test]
    async fn repeated_upload_reuses_the_key_with_a_fresh_url() {
        let (files, _) = setup(real()).await;
        let first = files.upload("alice", "report", "pdf", "").await.unwrap();
        let second = files.upload("alice", "report", ".PDF", "").await.unwrap();

        assert_eq!(first.object_key, second.object_key);
        assert_ne!(first.link.url, second.link.url);
    }

    #[tokio::test]
    async fn owners_get_distinct_keys() {
        let (files, _) = setup(real()).await;
        let a = files.upload("alice", "report", "pdf", "").await.unwrap();
        let b = files.upload("bob", "report", "pdf", "").await.unwrap();
        assert_ne!(a.object_key, b.object_key);
    }

    #[tokio::test]
    async fn download_of_unknown_file_is_not_found() {
        let (files, _) = setup(real()).await;
        let err = files.download("alice", "nope").await.unwrap_err();
        assert!(matches!(
            err,
            FileError::Record(RecordError::NotFound {
                kind: RecordKind::File,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn object_store_failure_saves_nothing() {
        let (files, _) = setup(Arc::new(UnreachableStore)).await;
        let err = files.upload("alice", "report", "pdf", "").await.unwrap_err();
        assert!(matches!(err, FileError::Link { .. }));

        let err = files.download("alice", "report").await.unwrap_err();
        assert!(matches!(err, FileError::Record(RecordError::NotFound { .. })));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let (files, _) = setup(real()).await;
        files.upload("alice", "report", "pdf", "").await.unwrap();
        files.delete("alice", "report").await.unwrap();
        assert!(files.download("alice", "report").await.is_err());
    }

    #[tokio::test]
    async fn names_cannot_escape_the_owner_prefix() {
        let (files, users) = setup(real()).await;
        let bob = users.find_user("bob").await.unwrap();

        for name in [
            format!("../{}/report", bob.id),
            "a/b".to_string(),
            "..".to_string(),
            ".".to_string(),
            "a\\b".to_string(),
        ] {
            let err = files.upload("alice", &name, "pdf", "").await.unwrap_err();
            assert!(
                matches!(err, FileError::InvalidName(_)),
                "{name:?} gave {err:?}"
            );
        }
        assert!(matches!(
            files.download("alice", "report").await,
            Err(FileError::Record(RecordError::NotFound { .. }))
        ));
    }

    #[test]
    fn extension_rules() {
        assert_eq!(normalize_extension(".TXT").unwrap(), "txt");
        assert!(normalize_extension("").is_err());
        assert!(normalize_extension("tar.gz").is_err());
        assert!(normalize_extension("p/df").is_err());
    }
}
