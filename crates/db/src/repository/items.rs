//! Item CRUD operations against Postgres.

use async_trait::async_trait;
use tracing::instrument;

use crate::{DbError, DbPool, Item, ItemUpdate, NewItem};

use super::ItemRepository;

/// [`ItemRepository`] backed by a shared Postgres pool.
///
/// Each method runs a single statement, so a connection is only checked out
/// for the duration of that statement.
#[derive(Debug, Clone)]
pub struct PgItemRepository {
    pool: DbPool,
}

impl PgItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Item, DbError> {
        let row = sqlx::query_as::<_, Item>(
            r#"SELECT id, name, description, created_at FROM items WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(row)
    }

    /// Rows come back ordered by `id`, i.e. insertion order.
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Item>, DbError> {
        let rows = sqlx::query_as::<_, Item>(
            r#"SELECT id, name, description, created_at FROM items ORDER BY id ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn create(&self, item: &NewItem) -> Result<Item, DbError> {
        // RETURNING gives back the stored row, so `created_at` carries the
        // column's precision rather than the caller's.
        let row = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name, description, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.created_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NothingInserted)?;

        Ok(row)
    }

    #[instrument(skip(self, update), fields(id = update.id))]
    async fn update(&self, update: &ItemUpdate) -> Result<(), DbError> {
        let result = sqlx::query(r#"UPDATE items SET name = $1, description = $2 WHERE id = $3"#)
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }

    /// Returns `DbError::NotFound` if no row was deleted.
    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
