//! Typed secret records.
//!
//! [`service::RecordService`] is the only place that turns typed payloads
//! into stored bytes and back ([`codec`]) and binds every operation to an
//! owner resolved from a login. [`queries`] is the Postgres record repository.

pub mod codec;
pub mod queries;
pub mod service;

use thiserror::Error;

use crate::models::record::RecordKind;
use crate::store::StoreError;

/// Maximum label length in characters.
pub const MAX_LABEL_LEN: usize = 255;

/// Record service errors. Each variant carries enough context (kind, label)
/// for the caller to report which operation failed.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("looking up user '{login}' failed: {source}")]
    UserLookup {
        login: String,
        #[source]
        source: StoreError,
    },

    #[error("{kind} not found")]
    NotFound { kind: RecordKind, label: String },

    #[error("invalid label: {0}")]
    InvalidLabel(String),

    #[error("cannot encode {kind} '{label}': {reason}")]
    Encoding {
        kind: RecordKind,
        label: String,
        reason: String,
    },

    #[error("cannot decode {kind} '{label}': {reason}")]
    Decoding {
        kind: RecordKind,
        label: String,
        reason: String,
    },

    #[error("{op} {kind} '{label}' failed: {source}")]
    Storage {
        op: &'static str,
        kind: RecordKind,
        label: String,
        #[source]
        source: StoreError,
    },
}

/// Labels are non-empty, bounded, and free of control characters.
pub fn validate_label(label: &str) -> Result<(), RecordError> {
    if label.is_empty() {
        return Err(RecordError::InvalidLabel("label must not be empty".into()));
    }
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(RecordError::InvalidLabel(format!(
            "label exceeds {MAX_LABEL_LEN} characters"
        )));
    }
    if label.chars().any(char::is_control) {
        return Err(RecordError::InvalidLabel(
            "label must not contain control characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rules() {
        assert!(validate_label("email").is_ok());
        assert!(validate_label("bank / personal").is_ok());
        assert!(validate_label("").is_err());
        assert!(validate_label("a\nb").is_err());
        assert!(validate_label(&"x".repeat(MAX_LABEL_LEN + 1)).is_err());
    }

    #[test]
    fn not_found_message_names_the_kind() {
        let err = RecordError::NotFound {
            kind: RecordKind::Credential,
            label: "email".into(),
        };
        assert_eq!(err.to_string(), "credential not found");
    }
}
