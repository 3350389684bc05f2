use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use todo_core::{CancellationToken, MemoryTodoRepository, StoreError, Todo, TodoId, TodoRepository};

/// In-memory store whose `save` stalls for `delay` before writing.
///
/// `started` is notified as soon as a save begins, so a test can wait until
/// a request is inside the handler.
pub struct SlowRepository {
    inner: MemoryTodoRepository,
    delay: Duration,
    pub started: Notify,
}

impl SlowRepository {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryTodoRepository::new(),
            delay,
            started: Notify::new(),
        }
    }
}

#[async_trait]
impl TodoRepository for SlowRepository {
    async fn save(&self, ctx: &CancellationToken, todo: Todo) -> Result<TodoId, StoreError> {
        self.started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.inner.save(ctx, todo).await
    }
    async fn get_by_id(&self, ctx: &CancellationToken, id: TodoId) -> Result<Todo, StoreError> {
        self.inner.get_by_id(ctx, id).await
    }
    async fn update_by_id(
        &self,
        ctx: &CancellationToken,
        id: TodoId,
        todo: Todo,
    ) -> Result<(), StoreError> {
        self.inner.update_by_id(ctx, id, todo).await
    }
    async fn delete_by_id(&self, ctx: &CancellationToken, id: TodoId) -> Result<(), StoreError> {
        self.inner.delete_by_id(ctx, id).await
    }
    async fn read_all(&self, ctx: &CancellationToken) -> Result<Vec<Todo>, StoreError> {
        self.inner.read_all(ctx).await
    }
}
