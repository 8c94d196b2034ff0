//! User API
//!
//! CRUD service for user records (name and Brazilian phone number) exposed
//! over HTTP under `/v0/user`, backed by PostgreSQL or an in-memory store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use api::state::AppState;
use domain::{DomainError, Repository, User};
use infrastructure::{
    storage::{
        run_schema_migrations, InMemoryRepository, PostgresConfig, PostgresRepository,
        StorageType,
    },
    user::{StorageUserRepository, UserService},
};

/// Wired application: handler state plus the pool backing it, if any
pub struct App {
    pub state: AppState,
    pub pool: Option<PgPool>,
}

/// Build the application for the configured storage backend.
///
/// The PostgreSQL backend connects with retries and applies pending schema
/// migrations before returning.
pub async fn create_app(config: &AppConfig) -> anyhow::Result<App> {
    let backend = StorageType::parse(&config.storage.backend).ok_or_else(|| {
        DomainError::configuration(format!(
            "unknown storage backend '{}'",
            config.storage.backend
        ))
    })?;

    let (storage, pool): (Arc<dyn Repository<User>>, Option<PgPool>) = match backend {
        StorageType::Postgres => {
            let pool = connect_database(config).await?;
            let applied = run_schema_migrations(&pool).await?;
            info!(applied, "Schema migrations applied");

            (Arc::new(PostgresRepository::<User>::new(pool.clone())), Some(pool))
        }
        StorageType::InMemory => {
            warn!("Using in-memory storage, records are lost on exit");

            (Arc::new(InMemoryRepository::<User>::new()), None)
        }
    };

    Ok(App {
        state: create_app_state_with_storage(config, storage),
        pool,
    })
}

/// Create the application state over an existing store
pub fn create_app_state_with_storage(
    config: &AppConfig,
    storage: Arc<dyn Repository<User>>,
) -> AppState {
    let repository = Arc::new(StorageUserRepository::new(storage));
    let service = UserService::new(repository);

    AppState::new(Arc::new(service))
        .with_error_mapping(config.server.error_mapping)
        .with_app_info(config.app.clone())
}

/// Open the PostgreSQL pool described by `database.*`
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, DomainError> {
    PostgresConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections)
        .with_connect_attempts(
            config.database.connect_attempts,
            config.database.connect_backoff_secs,
        )
        .connect()
        .await
}
