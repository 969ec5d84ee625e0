//! Payload encoding, chosen by kind.
//!
//! Every kind is stored as the JSON object of its payload struct. The storage
//! layer never looks inside the bytes.

use crate::models::record::RecordKind;
use crate::models::secret::SecretPayload;

pub fn encode(payload: &SecretPayload) -> Result<Vec<u8>, serde_json::Error> {
    match payload {
        SecretPayload::Credential(c) => serde_json::to_vec(c),
        SecretPayload::Card(c) => serde_json::to_vec(c),
        SecretPayload::Text(t) => serde_json::to_vec(t),
        SecretPayload::File(f) => serde_json::to_vec(f),
    }
}

/// Decode `bytes` as the payload shape of `kind`. Fails when the stored data
/// does not match that shape.
pub fn decode(kind: RecordKind, bytes: &[u8]) -> Result<SecretPayload, serde_json::Error> {
    match kind {
        RecordKind::Credential => serde_json::from_slice(bytes).map(SecretPayload::Credential),
        RecordKind::Card => serde_json::from_slice(bytes).map(SecretPayload::Card),
        RecordKind::Text => serde_json::from_slice(bytes).map(SecretPayload::Text),
        RecordKind::File => serde_json::from_slice(bytes).map(SecretPayload::File),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::secret::{Card, Credential, FileMetadata, Text};

    #[test]
    fn decode_inverts_encode() {
        let payloads = [
            SecretPayload::Credential(Credential {
                login: "bob@x.com".into(),
                password: "secret".into(),
            }),
            SecretPayload::Card(Card {
                number: "4111111111111111".into(),
                holder: "BOB".into(),
                expiry: "12/30".into(),
                cvv: "123".into(),
            }),
            SecretPayload::Text(Text {
                content: "multi\nline ünïcode".into(),
            }),
            SecretPayload::File(FileMetadata {
                file_name: "report".into(),
                extension: "pdf".into(),
                external_url: "https://bucket.s3.test/u/report.pdf?X-Amz-Signature=ab".into(),
            }),
        ];
        for payload in payloads {
            let bytes = encode(&payload).unwrap();
            assert_eq!(decode(payload.kind(), &bytes).unwrap(), payload);
        }
    }

    #[test]
    fn credential_is_stored_as_plain_object() {
        let bytes = encode(&SecretPayload::Credential(Credential {
            login: "l".into(),
            password: "p".into(),
        }))
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, serde_json::json!({"login": "l", "password": "p"}));
    }

    #[test]
    fn shape_mismatch_fails_to_decode() {
        let text = encode(&SecretPayload::Text(Text {
            content: "hello".into(),
        }))
        .unwrap();
        assert!(decode(RecordKind::Credential, &text).is_err());
        assert!(decode(RecordKind::Card, &text).is_err());

        let card_with_extra = br#"{"number":"1","holder":"h","expiry":"e","cvv":"c","pin":"0"}"#;
        assert!(decode(RecordKind::Card, card_with_extra).is_err());

        assert!(decode(RecordKind::Text, b"\xff\x00").is_err());
    }
}
