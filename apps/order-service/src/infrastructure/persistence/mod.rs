//! Persistence Adapters
//!
//! Implementations of `OrderRepository` plus pool and schema management.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryOrderRepository;
pub use postgres::PostgresOrderRepository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::infrastructure::config::DatabaseSettings;

/// Errors raised while opening the pool or applying migrations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Could not connect to the database.
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// Embedded migrations failed.
    #[error("Failed to apply migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open a connection pool for the lifetime of the process.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, PersistenceError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await
        .map_err(PersistenceError::Connection)?;

    tracing::info!(
        max_connections = settings.max_connections,
        "Database pool established"
    );
    Ok(pool)
}

/// Apply the embedded SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), PersistenceError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
