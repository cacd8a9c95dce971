//! Row and input structs for the `items` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// `NULL` in storage and omitted on the wire when there is no description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert an item. There is no `id`: storage assigns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    /// Stamped by the caller at insertion time.
    pub created_at: DateTime<Utc>,
}

impl NewItem {
    /// Build an insert stamped with the current time.
    ///
    /// An empty description is normalised to `None`.
    pub fn now(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.filter(|d| !d.is_empty()),
            created_at: Utc::now(),
        }
    }

    /// The row this insert becomes once storage has assigned `id`.
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// The mutable fields of an existing item, addressed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUpdate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
