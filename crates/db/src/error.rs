//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// No row matched the primary key (get, update, delete).
    #[error("row not found")]
    NotFound,

    /// An insert completed without returning the new row.
    #[error("no rows inserted")]
    NothingInserted,

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
