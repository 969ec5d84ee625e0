//! Record service: typed save/get/delete bound to a resolved owner.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::{RecordError, codec, validate_label};
use crate::models::auth::User;
use crate::models::record::{RecordKind, RecordSummary, SecretRecord};
use crate::models::secret::{Secret, SecretPayload};
use crate::store::{RecordStore, StoreError, UserStore};

/// Saves and loads typed secrets for a login.
///
/// Saving is an idempotent replace at (owner, label, kind): a second save
/// overwrites payload and metadata. Concurrent saves to the same key are
/// last-writer-wins at the store.
#[derive(Clone)]
pub struct RecordService {
    users: Arc<dyn UserStore>,
    records: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(users: Arc<dyn UserStore>, records: Arc<dyn RecordStore>) -> Self {
        Self { users, records }
    }

    /// Resolve the user row backing `login`.
    pub async fn resolve_owner(&self, login: &str) -> Result<User, RecordError> {
        self.users.find_user(login).await.map_err(|e| match e {
            StoreError::NotFound => RecordError::UserNotFound(login.to_string()),
            source => RecordError::UserLookup {
                login: login.to_string(),
                source,
            },
        })
    }

    /// Save a typed payload at `label`.
    pub async fn save<T: Secret>(
        &self,
        login: &str,
        label: &str,
        payload: T,
        metadata: &str,
    ) -> Result<(), RecordError> {
        self.save_payload(login, label, payload.into_payload(), metadata)
            .await
    }

    /// Save any payload; the kind is taken from the payload variant.
    pub async fn save_payload(
        &self,
        login: &str,
        label: &str,
        payload: SecretPayload,
        metadata: &str,
    ) -> Result<(), RecordError> {
        let kind = payload.kind();
        validate_label(label)?;
        let owner = self.resolve_owner(login).await?;

        let bytes = codec::encode(&payload).map_err(|e| RecordError::Encoding {
            kind,
            label: label.to_string(),
            reason: e.to_string(),
        })?;

        let id = self
            .records
            .upsert(owner.id, label, kind, &bytes, metadata)
            .await
            .map_err(|source| RecordError::Storage {
                op: "save",
                kind,
                label: label.to_string(),
                source,
            })?;

        debug!(login, label, %kind, record_id = %id, "record saved");
        Ok(())
    }

    /// Load the typed payload and metadata stored at `label`.
    pub async fn get<T: Secret>(&self, login: &str, label: &str) -> Result<(T, String), RecordError> {
        let (payload, metadata) = self.get_payload(login, label, T::KIND).await?;
        let typed = T::from_payload(payload).ok_or_else(|| RecordError::Decoding {
            kind: T::KIND,
            label: label.to_string(),
            reason: "payload kind mismatch".into(),
        })?;
        Ok((typed, metadata))
    }

    /// Load the payload of `kind` stored at `label`.
    pub async fn get_payload(
        &self,
        login: &str,
        label: &str,
        kind: RecordKind,
    ) -> Result<(SecretPayload, String), RecordError> {
        let owner = self.resolve_owner(login).await?;
        let record = self.find(owner.id, label, kind, "get").await?;

        let payload = codec::decode(kind, &record.payload).map_err(|e| RecordError::Decoding {
            kind,
            label: label.to_string(),
            reason: e.to_string(),
        })?;
        Ok((payload, record.metadata))
    }

    /// Delete the record of `kind` at `label`: look up its id within the
    /// owner's namespace, then delete by id.
    pub async fn delete(&self, login: &str, label: &str, kind: RecordKind) -> Result<(), RecordError> {
        let owner = self.resolve_owner(login).await?;
        let record = self.find(owner.id, label, kind, "delete").await?;

        self.records
            .delete(record.id)
            .await
            .map_err(|e| classify(e, "delete", kind, label))?;

        debug!(login, label, %kind, record_id = %record.id, "record deleted");
        Ok(())
    }

    /// Summaries of every record of `kind` the login owns.
    pub async fn list(&self, login: &str, kind: RecordKind) -> Result<Vec<RecordSummary>, RecordError> {
        let owner = self.resolve_owner(login).await?;
        self.records
            .list(owner.id, kind)
            .await
            .map_err(|source| RecordError::Storage {
                op: "list",
                kind,
                label: String::new(),
                source,
            })
    }

    async fn find(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
        op: &'static str,
    ) -> Result<SecretRecord, RecordError> {
        self.records
            .find(owner_id, label, kind)
            .await
            .map_err(|e| classify(e, op, kind, label))
    }
}

/// Map a store failure to a record error, keeping `NotFound` distinct.
fn classify(e: StoreError, op: &'static str, kind: RecordKind, label: &str) -> RecordError {
    match e {
        StoreError::NotFound => RecordError::NotFound {
            kind,
            label: label.to_string(),
        },
        source => RecordError::Storage {
            op,
            kind,
            label: label.to_string(),
            source,
        },
    }
}
