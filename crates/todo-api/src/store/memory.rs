use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use todo_domain::{Todo, TodoId};

use super::{StoreError, TodoStore};

/// In-memory store for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    todos: Mutex<HashMap<TodoId, Todo>>,
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.lock().unwrap().get(id).cloned())
    }

    async fn find_by_order(&self, order: i64) -> Result<Option<Todo>, StoreError> {
        Ok(self
            .todos
            .lock()
            .unwrap()
            .values()
            .find(|t| t.order == order)
            .cloned())
    }

    async fn max_order(&self) -> Result<Option<i64>, StoreError> {
        Ok(self.todos.lock().unwrap().values().map(|t| t.order).max())
    }

    async fn put(&self, todo: &Todo) -> Result<(), StoreError> {
        self.todos
            .lock()
            .unwrap()
            .insert(todo.id.clone(), todo.clone());
        Ok(())
    }

    async fn delete(&self, id: &TodoId) -> Result<(), StoreError> {
        self.todos.lock().unwrap().remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_record() {
        let store = MemoryStore::default();
        let todo = Todo::new("Task", 1);

        store.put(&todo).await.unwrap();

        let found = store.get(&todo.id).await.unwrap();
        assert_eq!(found, Some(todo));
    }

    #[tokio::test]
    async fn max_order_tracks_highest_rank() {
        let store = MemoryStore::default();
        assert_eq!(store.max_order().await.unwrap(), None);

        store.put(&Todo::new("A", 1)).await.unwrap();
        store.put(&Todo::new("B", 7)).await.unwrap();
        store.put(&Todo::new("C", 3)).await.unwrap();

        assert_eq!(store.max_order().await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn find_by_order_matches_rank() {
        let store = MemoryStore::default();
        let todo = Todo::new("A", 2);
        store.put(&todo).await.unwrap();

        assert_eq!(store.find_by_order(2).await.unwrap(), Some(todo));
        assert_eq!(store.find_by_order(9).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryStore::default();
        let todo = Todo::new("A", 1);
        store.put(&todo).await.unwrap();

        store.delete(&todo.id).await.unwrap();

        assert_eq!(store.get(&todo.id).await.unwrap(), None);
        assert!(store.list().await.unwrap().is_empty());
    }
}
