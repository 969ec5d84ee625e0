//! Typed secret payloads.
//!
//! One struct per [`RecordKind`], plus the [`SecretPayload`] tagged union that
//! the record codec works with. Field names on the wire match the stored JSON
//! so that payloads written by other clients decode unchanged.

use serde::{Deserialize, Serialize};

use super::record::RecordKind;

/// Login/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credential {
    pub login: String,
    pub password: String,
}

/// Payment card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub number: String,
    pub holder: String,
    pub expiry: String,
    pub cvv: String,
}

/// Free text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Text {
    pub content: String,
}

/// Metadata stub for a blob kept in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileMetadata {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub extension: String,
    #[serde(rename = "externalURL")]
    pub external_url: String,
}

/// Any payload, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Credential(Credential),
    Card(Card),
    Text(Text),
    File(FileMetadata),
}

impl SecretPayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            SecretPayload::Credential(_) => RecordKind::Credential,
            SecretPayload::Card(_) => RecordKind::Card,
            SecretPayload::Text(_) => RecordKind::Text,
            SecretPayload::File(_) => RecordKind::File,
        }
    }
}

/// A typed payload bound to exactly one [`RecordKind`].
///
/// Implemented for the four payload structs; the record service is generic
/// over this trait so callers get their own type back from `get`.
pub trait Secret: Sized + Send + Sync + 'static {
    const KIND: RecordKind;

    fn into_payload(self) -> SecretPayload;

    /// Returns `None` when `payload` belongs to another kind.
    fn from_payload(payload: SecretPayload) -> Option<Self>;
}

impl Secret for Credential {
    const KIND: RecordKind = RecordKind::Credential;

    fn into_payload(self) -> SecretPayload {
        SecretPayload::Credential(self)
    }

    fn from_payload(payload: SecretPayload) -> Option<Self> {
        match payload {
            SecretPayload::Credential(c) => Some(c),
            _ => None,
        }
    }
}

impl Secret for Card {
    const KIND: RecordKind = RecordKind::Card;

    fn into_payload(self) -> SecretPayload {
        SecretPayload::Card(self)
    }

    fn from_payload(payload: SecretPayload) -> Option<Self> {
        match payload {
            SecretPayload::Card(c) => Some(c),
            _ => None,
        }
    }
}

impl Secret for Text {
    const KIND: RecordKind = RecordKind::Text;

    fn into_payload(self) -> SecretPayload {
        SecretPayload::Text(self)
    }

    fn from_payload(payload: SecretPayload) -> Option<Self> {
        match payload {
            SecretPayload::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl Secret for FileMetadata {
    const KIND: RecordKind = RecordKind::File;

    fn into_payload(self) -> SecretPayload {
        SecretPayload::File(self)
    }

    fn from_payload(payload: SecretPayload) -> Option<Self> {
        match payload {
            SecretPayload::File(f) => Some(f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_metadata_uses_wire_field_names() {
        let meta = FileMetadata {
            file_name: "report".into(),
            extension: "pdf".into(),
            external_url: "https://example.test/x".into(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["fileName"], "report");
        assert_eq!(json["externalURL"], "https://example.test/x");
    }

    #[test]
    fn from_payload_rejects_other_kinds() {
        let payload = Text {
            content: "hi".into(),
        }
        .into_payload();
        assert_eq!(payload.kind(), RecordKind::Text);
        assert!(Credential::from_payload(payload).is_none());
    }
}
