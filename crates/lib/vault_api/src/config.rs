//! API server configuration.

use std::path::Path;

use vault_core::auth::jwt::{default_secret_path, resolve_jwt_secret};
use vault_core::objects::s3::S3Config;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Object store used for file blobs.
    pub s3: S3Config,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                              |
    /// |------------------------------|--------------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:8080`                     |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file        |
    /// | `S3_ENDPOINT`                | `http://localhost:9000`              |
    /// | `S3_REGION`                  | `us-east-1`                          |
    /// | `S3_BUCKET`                  | `vault`                              |
    /// | `S3_ACCESS_KEY_ID`           | empty                                |
    /// | `S3_SECRET_ACCESS_KEY`       | empty                                |
    /// | `S3_PATH_STYLE`              | inferred from the endpoint           |
    pub fn from_env() -> Self {
        Self::from_env_with(&default_secret_path())
    }

    /// Like [`ApiConfig::from_env`], persisting a generated JWT secret at
    /// `secret_path` instead of the platform data dir.
    pub fn from_env_with(secret_path: &Path) -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:8080"),
            jwt_secret: resolve_jwt_secret(secret_path),
            s3: S3Config {
                endpoint: env_or("S3_ENDPOINT", "http://localhost:9000"),
                region: env_or("S3_REGION", "us-east-1"),
                bucket: env_or("S3_BUCKET", "vault"),
                access_key_id: env_or("S3_ACCESS_KEY_ID", ""),
                secret_access_key: env_or("S3_SECRET_ACCESS_KEY", ""),
                path_style: std::env::var("S3_PATH_STYLE")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}
