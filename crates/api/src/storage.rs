//! Opens the record store backend chosen by configuration.

use std::sync::Arc;

use candy_db::store::{
    CandyStore, MemoryCandyStore, NullCandyStore, PgCandyStore, StorageBackend,
};

use crate::config::StorageConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageStartupError {
    #[error("DATABASE_URL is required for the postgres backend")]
    MissingDatabaseUrl,

    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Open the configured backend.
///
/// For Postgres this creates the pool, verifies connectivity and applies
/// pending migrations before returning.
pub async fn open_store(
    config: &StorageConfig,
) -> Result<Arc<dyn CandyStore>, StorageStartupError> {
    match config.backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(StorageStartupError::MissingDatabaseUrl)?;

            let pool = candy_db::create_pool(url, config.max_connections)
                .await
                .map_err(StorageStartupError::Connect)?;
            tracing::info!(
                max_connections = config.max_connections,
                "Database connection pool created"
            );

            candy_db::health_check(&pool)
                .await
                .map_err(StorageStartupError::Connect)?;
            tracing::info!("Database health check passed");

            candy_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgCandyStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage backend; data is lost on exit");
            Ok(Arc::new(MemoryCandyStore::new()))
        }
        StorageBackend::Offline => {
            tracing::warn!("No database configured, running in offline mode; writes are discarded");
            Ok(Arc::new(NullCandyStore))
        }
    }
}
