//! Repository traits for users and secret records.
//!
//! Postgres implementations live next to their queries
//! ([`crate::auth::queries::PgUserStore`], [`crate::records::queries::PgRecordStore`]);
//! [`memory`] holds in-process implementations for tests and local runs.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::auth::User;
use crate::models::record::{RecordKind, RecordSummary, SecretRecord};

/// Storage errors. `NotFound` and `Conflict` are kept apart from transport
/// failures so callers can branch on them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Db(sqlx::Error),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            other => StoreError::Db(other),
        }
    }
}

/// Credential repository.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Single-row lookup by unique login.
    async fn find_user(&self, login: &str) -> Result<User, StoreError>;

    /// Insert a user and return the assigned id. A duplicate login yields
    /// [`StoreError::Conflict`].
    async fn create_user(&self, login: &str, password_hash: &str) -> Result<Uuid, StoreError>;
}

/// Record repository. Payloads are opaque bytes here.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or fully replace the record at (owner, label, kind), returning its id.
    async fn upsert(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
        payload: &[u8],
        metadata: &str,
    ) -> Result<Uuid, StoreError>;

    async fn find(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
    ) -> Result<SecretRecord, StoreError>;

    /// Delete by record id. Missing ids yield [`StoreError::NotFound`].
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Summaries of one owner's records of one kind, ordered by label.
    async fn list(&self, owner_id: Uuid, kind: RecordKind)
    -> Result<Vec<RecordSummary>, StoreError>;
}
