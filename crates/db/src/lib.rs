//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, the `Item` models, and the [`ItemRepository`]
//! contract with its Postgres and in-memory implementations.
//! No HTTP concerns live here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;

pub use pool::DbPool;
pub use error::DbError;
pub use models::{Item, ItemUpdate, NewItem};
pub use repository::{ItemRepository, PgItemRepository};
