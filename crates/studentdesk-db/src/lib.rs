//! # studentdesk DB
//!
//! Persistence for the studentdesk API.
//!
//! The Record Store ([`StudentStore`]) and Identity Store ([`UserStore`]) are
//! traits so that handlers work against either backend:
//!
//! - [`postgres`]: PostgreSQL via SQLx, used in production
//! - [`memory`]: process-local store, used by tests and `DATABASE_URL=memory://`
//!
//! Every operation touches a single record and is atomic on its own: one SQL
//! statement, or one lock scope for the in-memory store.
//!
//! # Example
//!
//! ```ignore
//! use studentdesk_config::DatabaseConfig;
//! use studentdesk_db::init_stores;
//!
//! let stores = init_stores(&DatabaseConfig::from_env()?).await?;
//! let students = stores.students.list(&Default::default()).await?;
//! ```

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod students;
pub mod users;

use std::sync::Arc;

use studentdesk_config::{DatabaseConfig, StoreBackend};

pub use error::StoreError;
pub use memory::{MemoryStudentStore, MemoryUserStore};
pub use pool::{SchemaGuard, init_db_pool, run_migrations};
pub use postgres::{PgStudentStore, PgUserStore};
pub use students::StudentStore;
pub use users::UserStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Handles to both stores, shared by every request.
#[derive(Clone)]
pub struct Stores {
    pub students: Arc<dyn StudentStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            students: Arc::new(MemoryStudentStore::default()),
            users: Arc::new(MemoryUserStore::default()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::postgres_with_schema(SchemaGuard::new(pool))
    }

    /// Both stores share `schema`, so migrations run once for the pair.
    pub fn postgres_with_schema(schema: SchemaGuard) -> Self {
        Self {
            students: Arc::new(PgStudentStore::with_schema(schema.clone())),
            users: Arc::new(PgUserStore::with_schema(schema)),
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

/// Builds the stores selected by `config`.
///
/// The PostgreSQL pool connects lazily. Migrations are attempted here and, if
/// that fails, again before each store call until one succeeds: the server
/// keeps accepting requests while the database is down, data operations
/// report [`StoreError::Unavailable`], and the schema is created once the
/// database comes back.
///
/// # Errors
///
/// Returns an error only when the connection string cannot be parsed.
pub async fn init_stores(config: &DatabaseConfig) -> Result<Stores, StoreError> {
    match config.backend() {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Ok(Stores::in_memory())
        }
        StoreBackend::Postgres => {
            let schema = SchemaGuard::new(init_db_pool(config)?);

            if let Err(e) = schema.ensure().await {
                tracing::warn!(error = %e, "Failed to apply migrations; retrying on first use");
            }

            Ok(Stores::postgres_with_schema(schema))
        }
    }
}
