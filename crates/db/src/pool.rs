//! Postgres connection pool.
//!
//! The pool is created once by the caller and handed to
//! [`PgItemRepository`](crate::PgItemRepository); nothing in this crate keeps
//! a global handle.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool used across the whole application.
pub type DbPool = PgPool;

/// Create a new connection pool from the given `database_url`.
///
/// `max_connections` controls the pool ceiling; `connect_timeout` bounds how
/// long a caller waits to check out a connection.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    connect_timeout: Duration,
) -> Result<DbPool, DbError> {
    info!(
        "Connecting to database (max_connections={}, connect_timeout={:?})",
        max_connections, connect_timeout
    );
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(connect_timeout)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Check out one connection and round-trip a ping on it.
pub async fn ping(pool: &DbPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await?;
    conn.ping().await?;
    Ok(())
}

/// Run embedded SQLx migrations located in `./migrations` (relative to the
/// workspace root at build time).
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running database migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
