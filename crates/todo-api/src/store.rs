//! Persistence seam for todo records.

use async_trait::async_trait;
use thiserror::Error;
use todo_domain::{Todo, TodoId};

mod dynamo;
mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Store-level failure. Handlers map this to a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Backend(String),

    #[error("stored item is malformed: {0}")]
    Corrupt(String),
}

/// Minimal persistence abstraction over a document store.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos, in no particular order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Single todo by id.
    async fn get(&self, id: &TodoId) -> Result<Option<Todo>, StoreError>;

    /// Any todo currently holding the given order rank.
    async fn find_by_order(&self, order: i64) -> Result<Option<Todo>, StoreError>;

    /// Highest order rank in the collection, if any.
    async fn max_order(&self) -> Result<Option<i64>, StoreError>;

    /// Insert or overwrite a record.
    async fn put(&self, todo: &Todo) -> Result<(), StoreError>;

    /// Remove a record by id.
    async fn delete(&self, id: &TodoId) -> Result<(), StoreError>;
}
