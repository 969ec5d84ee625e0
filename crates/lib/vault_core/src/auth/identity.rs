//! Bearer identity resolution.
//!
//! Turns an `Authorization` header value into the login it asserts. The
//! signature and expiry are verified on every call; there is no
//! parse-only path.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde_json::{Map, Value};

use super::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolve the login claimed by `"Bearer <token>"`.
pub fn resolve_login(authorization: &str, secret: &[u8]) -> Result<String, AuthError> {
    let token = authorization
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingScheme)?;

    let mut validation = Validation::default();
    validation.validate_exp = true;

    let data = decode::<Map<String, Value>>(
        token.trim(),
        &DecodingKey::from_secret(secret),
        &validation,
    )
    .map_err(classify)?;

    match data.claims.get("login") {
        Some(Value::String(login)) if login.is_empty() => {
            Err(AuthError::MalformedToken("login claim is empty".into()))
        }
        Some(Value::String(login)) => Ok(login.clone()),
        Some(_) => Err(AuthError::MalformedToken("login claim is not a string".into())),
        None => Err(AuthError::MalformedToken("login claim is missing".into())),
    }
}

/// Structural decode failures versus verification failures.
fn classify(e: jsonwebtoken::errors::Error) -> AuthError {
    match e.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::ParseFailure(e.to_string()),
        _ => AuthError::InvalidToken(e.to_string()),
    }
}
