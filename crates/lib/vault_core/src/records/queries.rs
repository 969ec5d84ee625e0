//! Record repository backed by the `secret_records` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::record::{RecordKind, RecordSummary, SecretRecord};
use crate::store::{RecordStore, StoreError};
use crate::uuid::uuidv7;

/// Row as stored; `kind` is the text tag.
#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: Uuid,
    owner_id: Uuid,
    label: String,
    kind: String,
    payload: Vec<u8>,
    metadata: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for SecretRecord {
    type Error = StoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<RecordKind>()
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        Ok(SecretRecord {
            id: row.id,
            owner_id: row.owner_id,
            label: row.label,
            kind,
            payload: row.payload,
            metadata: row.metadata,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    label: String,
    metadata: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// [`RecordStore`] over a Postgres pool.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn upsert(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
        payload: &[u8],
        metadata: &str,
    ) -> Result<Uuid, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO secret_records (id, owner_id, label, kind, payload, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (owner_id, label, kind) DO UPDATE
            SET payload = EXCLUDED.payload,
                metadata = EXCLUDED.metadata,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(uuidv7())
        .bind(owner_id)
        .bind(label)
        .bind(kind.as_str())
        .bind(payload)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find(
        &self,
        owner_id: Uuid,
        label: &str,
        kind: RecordKind,
    ) -> Result<SecretRecord, StoreError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, owner_id, label, kind, payload, metadata, created_at, updated_at
            FROM secret_records
            WHERE owner_id = $1 AND label = $2 AND kind = $3
            "#,
        )
        .bind(owner_id)
        .bind(label)
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM secret_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list(
        &self,
        owner_id: Uuid,
        kind: RecordKind,
    ) -> Result<Vec<RecordSummary>, StoreError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT label, metadata, created_at, updated_at
            FROM secret_records
            WHERE owner_id = $1 AND kind = $2
            ORDER BY label ASC
            "#,
        )
        .bind(owner_id)
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RecordSummary {
                label: r.label,
                kind,
                metadata: r.metadata,
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
            .collect())
    }
}
