//! Storage abstraction for todo records.
//!
//! The use case depends only on [`TodoRepository`]; [`memory`] provides the
//! process-local implementation used by the server.

pub mod memory;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::StoreError;
use crate::types::{Todo, TodoId};

pub use memory::MemoryTodoRepository;

/// Keyed storage for todo records.
///
/// Implementations own the canonical copies: records go in and come out by
/// value. Every operation checks `ctx` before touching any state and returns
/// [`StoreError::Cancelled`] if it has already fired.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores `todo` under a freshly assigned id and returns that id.
    ///
    /// Any id already present on `todo` is ignored.
    async fn save(&self, ctx: &CancellationToken, todo: Todo) -> Result<TodoId, StoreError>;

    async fn get_by_id(&self, ctx: &CancellationToken, id: TodoId) -> Result<Todo, StoreError>;

    /// Replaces the record stored under `id`. The stored id stays `id`
    /// whatever `todo.id` holds. Missing ids are an error, not an insert.
    async fn update_by_id(
        &self,
        ctx: &CancellationToken,
        id: TodoId,
        todo: Todo,
    ) -> Result<(), StoreError>;

    async fn delete_by_id(&self, ctx: &CancellationToken, id: TodoId) -> Result<(), StoreError>;

    /// Snapshot of every record, ascending by id.
    async fn read_all(&self, ctx: &CancellationToken) -> Result<Vec<Todo>, StoreError>;
}

/// Entry check shared by every implementation.
pub(crate) fn ensure_active(ctx: &CancellationToken) -> Result<(), StoreError> {
    if ctx.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    Ok(())
}
