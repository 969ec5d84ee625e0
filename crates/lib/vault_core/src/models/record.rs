//! Persisted record shape shared by every secret kind.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of record kinds. Each kind is an independent label namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Credential,
    Card,
    Text,
    File,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Credential,
        RecordKind::Card,
        RecordKind::Text,
        RecordKind::File,
    ];

    /// Tag stored in the `kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Credential => "credential",
            RecordKind::Card => "card",
            RecordKind::Text => "text",
            RecordKind::File => "file",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored or requested kind tag is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A stored secret. The payload is opaque bytes; only the record service
/// knows how to interpret it for a given `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub label: String,
    pub kind: RecordKind,
    pub payload: Vec<u8>,
    pub metadata: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: everything but the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub label: String,
    pub kind: RecordKind,
    pub metadata: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&SecretRecord> for RecordSummary {
    fn from(r: &SecretRecord) -> Self {
        Self {
            label: r.label.clone(),
            kind: r.kind,
            metadata: r.metadata.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
