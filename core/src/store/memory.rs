//! In-memory todo repository.
//!
//! ## Limitations
//!
//! - **No persistence**: all records are lost when the process exits
//! - **Single-process only**: nothing is shared across process boundaries

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use super::{ensure_active, TodoRepository};
use crate::error::StoreError;
use crate::types::{Todo, TodoId};

/// Map and id counter, always locked together.
#[derive(Debug)]
struct Inner {
    todos: BTreeMap<TodoId, Todo>,
    next_id: TodoId,
}

/// Thread-safe in-memory implementation of [`TodoRepository`].
///
/// A single `RwLock` covers both the records and the id counter. Reads share
/// the lock; every write holds it exclusively. No `.await` happens while a
/// guard is held, so each operation is one uninterrupted critical section.
#[derive(Debug)]
pub struct MemoryTodoRepository {
    inner: RwLock<Inner>,
}

impl Default for MemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    fn starting_at(next_id: TodoId) -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: BTreeMap::new(),
                next_id,
            }),
        }
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn save(&self, ctx: &CancellationToken, mut todo: Todo) -> Result<TodoId, StoreError> {
        ensure_active(ctx)?;

        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Internal("todo id space exhausted".to_string()))?;

        todo.id = id;
        inner.todos.insert(id, todo);
        inner.next_id = next_id;
        tracing::debug!(id, "todo saved");
        Ok(id)
    }

    async fn get_by_id(&self, ctx: &CancellationToken, id: TodoId) -> Result<Todo, StoreError> {
        ensure_active(ctx)?;

        let inner = self.inner.read().await;
        inner.todos.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update_by_id(
        &self,
        ctx: &CancellationToken,
        id: TodoId,
        mut todo: Todo,
    ) -> Result<(), StoreError> {
        ensure_active(ctx)?;

        let mut inner = self.inner.write().await;
        let slot = inner.todos.get_mut(&id).ok_or(StoreError::NotFound)?;
        todo.id = id;
        *slot = todo;
        tracing::debug!(id, "todo updated");
        Ok(())
    }

    async fn delete_by_id(&self, ctx: &CancellationToken, id: TodoId) -> Result<(), StoreError> {
        ensure_active(ctx)?;

        let mut inner = self.inner.write().await;
        inner.todos.remove(&id).ok_or(StoreError::NotFound)?;
        tracing::debug!(id, "todo deleted");
        Ok(())
    }

    async fn read_all(&self, ctx: &CancellationToken) -> Result<Vec<Todo>, StoreError> {
        ensure_active(ctx)?;

        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }
}
