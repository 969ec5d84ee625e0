//! JWT token issuance and secret resolution.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Token lifetime: 24 hours.
pub const TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Generate a signed JWT (HS256, 24h expiry) asserting `login`.
pub fn issue_token(login: &str, secret: &[u8]) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        login: login.to_string(),
        exp: (now + Duration::seconds(TOKEN_EXPIRY_SECS)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Environment variables consulted for the signing secret, in order.
const SECRET_ENV_VARS: [&str; 2] = ["JWT_SECRET", "AUTH_SECRET"];

const GENERATED_SECRET_LEN: usize = 64;

/// Signing secret for tokens. The first non-empty variable in
/// [`SECRET_ENV_VARS`] wins; otherwise the secret stored at `secret_path` is
/// reused, and failing that a new one is generated and written there.
///
/// A secret that cannot be persisted is still returned, so the process keeps
/// working; tokens just won't survive a restart.
pub fn resolve_jwt_secret(secret_path: &Path) -> String {
    if let Some(secret) = SECRET_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
    {
        return secret;
    }
    if let Some(secret) = read_stored_secret(secret_path) {
        return secret;
    }

    let secret = generate_secret();
    match store_secret(secret_path, &secret) {
        Ok(()) => info!(path = %secret_path.display(), "generated token signing secret"),
        Err(e) => warn!(
            path = %secret_path.display(),
            error = %e,
            "could not persist token signing secret; tokens will not survive a restart"
        ),
    }
    secret
}

fn read_stored_secret(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let secret = contents.trim();
    (!secret.is_empty()).then(|| secret.to_string())
}

fn store_secret(path: &Path, secret: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, secret)
}

fn generate_secret() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

/// Default location of the persisted JWT secret.
pub fn default_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vault")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn issued_token_expires_in_a_day() {
        let token = issue_token("alice", b"secret").unwrap();
        let data = decode::<TokenClaims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.login, "alice");
        assert_eq!(data.claims.exp - data.claims.iat, TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn stored_secret_is_reused() {
        let dir = std::env::temp_dir().join(format!("vault-jwt-{}", uuid::Uuid::new_v4()));
        let path = dir.join("jwt-secret");
        assert_eq!(read_stored_secret(&path), None);

        let secret = generate_secret();
        assert_eq!(secret.len(), GENERATED_SECRET_LEN);
        store_secret(&path, &format!("{secret}\n")).unwrap();
        assert_eq!(read_stored_secret(&path).as_deref(), Some(secret.as_str()));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
