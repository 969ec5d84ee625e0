//! # vault_api
//!
//! HTTP API library for Vault.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use vault_core::auth::queries::PgUserStore;
use vault_core::files::FileService;
use vault_core::models::secret::{Card, Credential, Text};
use vault_core::objects::ObjectStore;
use vault_core::objects::links::ObjectLinkService;
use vault_core::records::queries::PgRecordStore;
use vault_core::records::service::RecordService;
use vault_core::store::{RecordStore, UserStore};

use crate::config::ApiConfig;
use crate::handlers::{auth, data, file};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential repository.
    pub users: Arc<dyn UserStore>,
    /// Typed record service.
    pub records: RecordService,
    /// File metadata + object link flow.
    pub files: FileService,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn new(
        users: Arc<dyn UserStore>,
        records: Arc<dyn RecordStore>,
        objects: Arc<dyn ObjectStore>,
        config: ApiConfig,
    ) -> Self {
        let record_service = RecordService::new(users.clone(), records);
        let files = FileService::new(record_service.clone(), ObjectLinkService::new(objects));
        Self {
            users,
            records: record_service,
            files,
            config,
        }
    }

    /// Wire services over Postgres.
    pub fn postgres(pool: PgPool, objects: Arc<dyn ObjectStore>, config: ApiConfig) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgRecordStore::new(pool)),
            objects,
            config,
        )
    }
}

/// Run embedded database migrations.
///
/// Delegates to `vault_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    vault_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::POST_USER_REGISTER, post(auth::register_handler))
        .route(routes::POST_USER_LOGIN, post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::DATA_CREDENTIAL, get(data::list_secrets::<Credential>))
        .route(
            routes::DATA_CREDENTIAL_LABEL,
            post(data::save_secret::<Credential>)
                .get(data::get_secret::<Credential>)
                .delete(data::delete_secret::<Credential>),
        )
        .route(routes::DATA_CARD, get(data::list_secrets::<Card>))
        .route(
            routes::DATA_CARD_LABEL,
            post(data::save_secret::<Card>)
                .get(data::get_secret::<Card>)
                .delete(data::delete_secret::<Card>),
        )
        .route(routes::DATA_TEXT, get(data::list_secrets::<Text>))
        .route(
            routes::DATA_TEXT_LABEL,
            post(data::save_secret::<Text>)
                .get(data::get_secret::<Text>)
                .delete(data::delete_secret::<Text>),
        )
        .route(routes::POST_FILE_UPLOAD, post(file::upload_handler))
        .route(routes::GET_FILE_DOWNLOAD, get(file::download_handler))
        .route(routes::DELETE_FILE_NAME, delete(file::delete_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
