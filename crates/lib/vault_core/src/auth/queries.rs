//! Credential repository backed by the `users` table.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::auth::User;
use crate::store::{StoreError, UserStore};

/// Fetch a user by login.
pub async fn find_user_by_login<'e, E>(executor: E, login: &str) -> Result<User, StoreError>
where
    E: PgExecutor<'e>,
{
    let user = sqlx::query_as::<_, User>(
        "SELECT id, login, password_hash, created_at FROM users WHERE login = $1",
    )
    .bind(login)
    .fetch_one(executor)
    .await?;
    Ok(user)
}

/// Insert a user, returning the assigned id.
///
/// Accepts any executor so registration can run inside a caller's transaction.
pub async fn insert_user<'e, E>(
    executor: E,
    login: &str,
    password_hash: &str,
) -> Result<Uuid, StoreError>
where
    E: PgExecutor<'e>,
{
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (login, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(login)
    .bind(password_hash)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

/// [`UserStore`] over a Postgres pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user as part of an open transaction.
    pub async fn create_user_in(
        tx: &mut Transaction<'_, Postgres>,
        login: &str,
        password_hash: &str,
    ) -> Result<Uuid, StoreError> {
        insert_user(&mut **tx, login, password_hash).await
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user(&self, login: &str) -> Result<User, StoreError> {
        find_user_by_login(&self.pool, login).await
    }

    async fn create_user(&self, login: &str, password_hash: &str) -> Result<Uuid, StoreError> {
        let mut tx = self.pool.begin().await?;
        let id = Self::create_user_in(&mut tx, login, password_hash).await?;
        tx.commit().await?;
        Ok(id)
    }
}
