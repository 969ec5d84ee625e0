//! Vault API server binary.
//!
//! Connects to Postgres, runs migrations, and serves the HTTP API until
//! Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use vault_api::config::ApiConfig;
use vault_core::objects::s3::S3Presigner;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "vault_api_server", about = "Vault secret store API server")]
struct Args {
    /// Address to bind.
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/vault"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// File holding the JWT secret when `JWT_SECRET`/`AUTH_SECRET` are unset.
    #[arg(long, env = "JWT_SECRET_FILE")]
    jwt_secret_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,vault_api=debug,vault_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    info!(port = args.port, max_connections = args.max_connections, "starting vault_api_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    vault_api::migrate(&pool).await?;

    let mut config = match &args.jwt_secret_file {
        Some(path) => ApiConfig::from_env_with(path),
        None => ApiConfig::from_env(),
    };
    config.bind_addr = format!("{}:{}", args.host, args.port);

    let presigner = S3Presigner::new(config.s3.clone())?;
    info!(bucket = presigner.bucket(), endpoint = %config.s3.endpoint, "object store configured");

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let state = vault_api::AppState::postgres(pool, Arc::new(presigner), config);
    let app = vault_api::router(state);

    info!(%local_addr, "vault_api_server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
