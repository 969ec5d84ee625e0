//! Registration and login flows over the credential repository.

use tracing::info;
use vault_core::auth::AuthError;
use vault_core::auth::jwt::{TOKEN_EXPIRY_SECS, issue_token};
use vault_core::auth::password::{hash_password, verify_password};
use vault_core::store::{StoreError, UserStore};

use crate::error::AppResult;
use crate::models::TokenResponse;

const MIN_PASSWORD_LEN: usize = 8;

fn validate(login: &str, password: &str) -> Result<(), AuthError> {
    if login.trim().is_empty() {
        return Err(AuthError::ValidationError("login must not be empty".into()));
    }
    if login.chars().any(char::is_control) {
        return Err(AuthError::ValidationError(
            "login must not contain control characters".into(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::ValidationError(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn token_response(login: &str, secret: &[u8]) -> AppResult<TokenResponse> {
    Ok(TokenResponse {
        access_token: issue_token(login, secret)?,
        token_type: "Bearer".into(),
        expires_in: TOKEN_EXPIRY_SECS,
        login: login.to_string(),
    })
}

/// Create an account and return a token for it.
pub async fn register(
    users: &dyn UserStore,
    login: &str,
    password: &str,
    secret: &[u8],
) -> AppResult<TokenResponse> {
    validate(login, password)?;
    let hash = hash_password(password)?;
    match users.create_user(login, &hash).await {
        Ok(id) => info!(%id, login, "user registered"),
        Err(StoreError::Conflict(_)) => {
            return Err(AuthError::Conflict(login.to_string()).into());
        }
        Err(e) => return Err(e.into()),
    }
    token_response(login, secret)
}

/// Verify a password and return a fresh token.
///
/// Unknown logins and wrong passwords are indistinguishable to the caller.
pub async fn login(
    users: &dyn UserStore,
    login: &str,
    password: &str,
    secret: &[u8],
) -> AppResult<TokenResponse> {
    let user = match users.find_user(login).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Err(AuthError::CredentialError.into()),
        Err(e) => return Err(e.into()),
    };
    if !verify_password(password, &user.password_hash)? {
        return Err(AuthError::CredentialError.into());
    }
    info!(login, "user logged in");
    token_response(login, secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use vault_core::auth::identity::resolve_login;
    use vault_core::store::memory::MemoryUserStore;

    const SECRET: &[u8] = b"test-secret";

    #[tokio::test]
    async fn register_then_login() {
        let users = MemoryUserStore::new();
        let reg = register(&users, "alice", "password1", SECRET).await.unwrap();
        assert_eq!(reg.token_type, "Bearer");
        assert_eq!(reg.expires_in, 24 * 60 * 60);
        let header = format!("Bearer {}", reg.access_token);
        assert_eq!(resolve_login(&header, SECRET).unwrap(), "alice");

        let tok = login(&users, "alice", "password1", SECRET).await.unwrap();
        assert_eq!(tok.login, "alice");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let users = MemoryUserStore::new();
        register(&users, "alice", "password1", SECRET).await.unwrap();
        let err = register(&users, "alice", "password2", SECRET)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() {
        let users = MemoryUserStore::new();
        register(&users, "alice", "password1", SECRET).await.unwrap();
        assert!(matches!(
            login(&users, "alice", "wrong-password", SECRET).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            login(&users, "nobody", "password1", SECRET).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn validation_reports_auth_validation_errors() {
        assert!(matches!(
            validate("alice", "short"),
            Err(AuthError::ValidationError(_))
        ));
        assert!(matches!(
            validate("al\nice", "password1"),
            Err(AuthError::ValidationError(_))
        ));
        assert!(validate("alice", "password1").is_ok());
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let users = MemoryUserStore::new();
        assert!(matches!(
            register(&users, "alice", "short", SECRET).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            register(&users, "  ", "password1", SECRET).await,
            Err(AppError::Validation(_))
        ));
    }
}
