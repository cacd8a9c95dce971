//! The item repository contract and its implementations.
//!
//! Every implementation returns `Result<T, DbError>` and reports a missing
//! primary key as [`DbError::NotFound`], never as a generic failure.

pub mod items;
pub mod mock;

use async_trait::async_trait;

use crate::{DbError, Item, ItemUpdate, NewItem};

pub use items::PgItemRepository;
pub use mock::MockItemRepository;

/// Storage-agnostic access to the `items` table.
///
/// Callers never see SQL or driver errors; they see a value,
/// [`DbError::NotFound`], or some other [`DbError`] meaning storage failed.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Fetch exactly one item by primary key.
    async fn get_by_id(&self, id: i64) -> Result<Item, DbError>;

    /// Return every item. An empty table is `Ok(vec![])`.
    async fn list_all(&self) -> Result<Vec<Item>, DbError>;

    /// Persist a new item and return it with the storage-assigned `id`.
    async fn create(&self, item: &NewItem) -> Result<Item, DbError>;

    /// Overwrite `name` and `description` of the row matching `update.id`.
    async fn update(&self, update: &ItemUpdate) -> Result<(), DbError>;

    /// Permanently delete an item by primary key.
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}
