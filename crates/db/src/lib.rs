//! Persistence layer: sqlx models and repositories for the device hierarchy.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub mod error;
pub mod models;
pub mod repositories;

/// Open a connection pool against the given database URL.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
