//! In-memory stores with the same semantics as the Postgres ones.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{RecordStore, StoreError, UserStore};
use crate::models::auth::User;
use crate::models::record::{RecordKind, RecordSummary, SecretRecord};
use crate::uuid::uuidv7;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user(&self, login: &str) -> Result<User, StoreError> {
        self.users
            .lock()
            .await
            .get(login)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_user(&self, login: &str, password_hash: &str) -> Result<Uuid, StoreError> {
        let mut users = self.users.lock().await;
        if users.contains_key(login) {
            return Err(StoreError::Conflict(format!("login '{login}' already exists")));
        }
        let user = User {
            id: Uuid::new_v4(),
            login: login.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        let id = user.id;
        users.insert(login.to_string(), user);
        Ok(id)
    }
}

type RecordKey = (Uuid, String, RecordKind);

#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<RecordKey, SecretRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored payload bytes of a record in place, as an
    /// incompatible client would.
    #[cfg(test)]
    pub(crate) async fn corrupt_payload(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
        payload: Vec<u8>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&(owner_id, label.to_string(), kind))
            .ok_or(StoreError::NotFound)?;
        record.payload = payload;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn upsert(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
        payload: &[u8],
        metadata: &str,
    ) -> Result<Uuid, StoreError> {
        let now = Utc::now();
        let mut records = self.records.lock().await;
        let record = records
            .entry((owner_id, label.to_string(), kind))
            .and_modify(|r| {
                r.payload = payload.to_vec();
                r.metadata = metadata.to_string();
                r.updated_at = now;
            })
            .or_insert_with(|| SecretRecord {
                id: uuidv7(),
                owner_id,
                label: label.to_string(),
                kind,
                payload: payload.to_vec(),
                metadata: metadata.to_string(),
                created_at: now,
                updated_at: now,
            });
        Ok(record.id)
    }

    async fn find(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
    ) -> Result<SecretRecord, StoreError> {
        self.records
            .lock()
            .await
            .get(&(owner_id, label.to_string(), kind))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list(
        &self,
        owner_id: Uuid,
        kind: RecordKind,
    ) -> Result<Vec<RecordSummary>, StoreError> {
        let records = self.records.lock().await;
        let mut rows: Vec<RecordSummary> = records
            .values()
            .filter(|r| r.owner_id == owner_id && r.kind == kind)
            .map(RecordSummary::from)
            .collect();
        rows.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_login_is_a_conflict() {
        let store = MemoryUserStore::new();
        store.create_user("alice", "h").await.unwrap();
        let err = store.create_user("alice", "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn upsert_keeps_id_and_created_at() {
        let store = MemoryRecordStore::new();
        let owner = Uuid::new_v4();
        let first = store
            .upsert(owner, "a", RecordKind::Text, b"1", "m1")
            .await
            .unwrap();
        let created = store.find(owner, "a", RecordKind::Text).await.unwrap();
        let second = store
            .upsert(owner, "a", RecordKind::Text, b"2", "m2")
            .await
            .unwrap();
        let updated = store.find(owner, "a", RecordKind::Text).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(created.created_at, updated.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.payload, b"2");
        assert_eq!(updated.metadata, "m2");
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let store = MemoryRecordStore::new();
        let err = store.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
