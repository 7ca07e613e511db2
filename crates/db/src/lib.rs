//! Storage layer for the NovelVerse platform.
//!
//! All persistence goes through the [`storage::Storage`] trait, which has two
//! implementations: [`storage::MemStorage`] (map-based, for tests and local
//! development) and [`storage::PgStorage`] (PostgreSQL via sqlx, production).
//! The trait is the canonical behavior contract; the repositories module
//! holds the SQL that backs the PostgreSQL implementation.

pub mod models;
pub mod repositories;
pub mod storage;

pub use storage::{MemStorage, PgStorage, Storage, StorageError, StorageResult};

/// Shared connection pool type used across the workspace.
pub type DbPool = sqlx::PgPool;

/// Create a PostgreSQL connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from the embedded `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
