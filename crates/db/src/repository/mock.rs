//! `MockItemRepository` — an in-memory test double for `ItemRepository`.
//!
//! Useful in handler tests where a real Postgres is either unavailable or
//! irrelevant. Ids are assigned from a counter that never goes backwards, so
//! a deleted id is never handed out again.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{DbError, Item, ItemUpdate, NewItem};

use super::ItemRepository;

/// One recorded call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    GetById(i64),
    ListAll,
    Create(String),
    Update(i64),
    Delete(i64),
}

#[derive(Debug, Default)]
struct MockState {
    items: Vec<Item>,
    last_id: i64,
    calls: Vec<MockCall>,
}

/// A mock repository that records every call it receives and can be switched
/// into a mode where every operation fails as a storage error.
#[derive(Debug, Default)]
pub struct MockItemRepository {
    state: Mutex<MockState>,
    failing: AtomicBool,
}

impl MockItemRepository {
    /// An empty, healthy repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every call fails with a storage error.
    pub fn failing() -> Self {
        let repo = Self::default();
        repo.set_failing(true);
        repo
    }

    /// Toggle failure mode. Calls are still recorded while failing.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every call seen so far, in call order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls made so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Snapshot of the stored items, bypassing call recording.
    pub async fn items(&self) -> Vec<Item> {
        self.state.lock().await.items.clone()
    }

    fn check(&self) -> Result<(), DbError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn get_by_id(&self, id: i64) -> Result<Item, DbError> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::GetById(id));
        self.check()?;

        state
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Item>, DbError> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::ListAll);
        self.check()?;

        Ok(state.items.clone())
    }

    async fn create(&self, item: &NewItem) -> Result<Item, DbError> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::Create(item.name.clone()));
        self.check()?;

        state.last_id += 1;
        let created = item.clone().into_item(state.last_id);
        state.items.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: &ItemUpdate) -> Result<(), DbError> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::Update(update.id));
        self.check()?;

        let item = state
            .items
            .iter_mut()
            .find(|item| item.id == update.id)
            .ok_or(DbError::NotFound)?;
        item.name = update.name.clone();
        item.description = update.description.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::Delete(id));
        self.check()?;

        let before = state.items.len();
        state.items.retain(|item| item.id != id);
        if state.items.len() == before {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
