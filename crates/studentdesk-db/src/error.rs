use studentdesk_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be reached (connection refused, pool timeout, TLS).
    #[error("datastore unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    #[error("datastore query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("invalid database configuration: {0}")]
    Configuration(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            other => StoreError::Query(other),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) | StoreError::Migration(_) => AppError::store_unavailable(err),
            StoreError::Conflict(_) => AppError::validation(err),
            StoreError::Query(_) | StoreError::Configuration(_) => AppError::internal(err),
        }
    }
}
