//! PostgreSQL connection pool and migrations.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use studentdesk_config::DatabaseConfig;
use tokio::sync::OnceCell;

use crate::error::StoreError;

/// Creates a PostgreSQL pool without opening a connection.
///
/// Connections are established on first use, so a database that is down at
/// startup does not stop the server; each query then fails with
/// [`StoreError::Unavailable`] after the acquire timeout.
///
/// # Errors
///
/// Returns [`StoreError::Configuration`] when the URL cannot be parsed.
pub fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&config.url)
        .map_err(|e| StoreError::Configuration(e.to_string()))
}

/// Applies the embedded migrations under `migrations/`.
///
/// A database that cannot be reached is reported as
/// [`StoreError::Unavailable`], like any other query.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| match e {
            MigrateError::Execute(err) => StoreError::from(err),
            other => StoreError::Migration(other),
        })?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Runs the migrations once per process before the first query.
///
/// A failed attempt leaves the guard unset, so the next store call tries
/// again. Concurrent callers wait on a single attempt. Clones share state.
#[derive(Debug, Clone)]
pub struct SchemaGuard {
    pool: PgPool,
    ready: Arc<OnceCell<()>>,
}

impl SchemaGuard {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            ready: Arc::new(OnceCell::new()),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    pub async fn ensure(&self) -> Result<(), StoreError> {
        self.ready
            .get_or_try_init(|| run_migrations(&self.pool))
            .await?;
        Ok(())
    }
}
