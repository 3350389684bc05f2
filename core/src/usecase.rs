//! Validation and delegation layer between the HTTP handlers and the store.
//!
//! # Design
//! `TodoUseCase` holds nothing but a handle to a `TodoRepository`. It checks
//! input, forwards to the store, and wraps store failures with the operation
//! name. There are no retries: the first store failure is the answer.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::TodoError;
use crate::store::TodoRepository;
use crate::types::{Todo, TodoId};

#[derive(Clone)]
pub struct TodoUseCase {
    repo: Arc<dyn TodoRepository>,
}

impl std::fmt::Debug for TodoUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoUseCase").finish_non_exhaustive()
    }
}

impl TodoUseCase {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    /// Validates `todo` and stores it, returning the assigned id.
    ///
    /// An empty title is rejected without calling the store.
    pub async fn create_todo(
        &self,
        ctx: &CancellationToken,
        todo: Todo,
    ) -> Result<TodoId, TodoError> {
        todo.validate()?;
        self.repo
            .save(ctx, todo)
            .await
            .map_err(TodoError::store("save todo"))
    }

    pub async fn get_all_todos(&self, ctx: &CancellationToken) -> Result<Vec<Todo>, TodoError> {
        self.repo
            .read_all(ctx)
            .await
            .map_err(TodoError::store("read all todos"))
    }

    pub async fn get_todo_by_id(
        &self,
        ctx: &CancellationToken,
        id: TodoId,
    ) -> Result<Todo, TodoError> {
        self.repo
            .get_by_id(ctx, id)
            .await
            .map_err(TodoError::store("get todo by id"))
    }

    /// Validates `todo` exactly as `create_todo` does, then replaces the
    /// record stored under `id`.
    pub async fn update_todo_by_id(
        &self,
        ctx: &CancellationToken,
        id: TodoId,
        todo: Todo,
    ) -> Result<(), TodoError> {
        todo.validate()?;
        self.repo
            .update_by_id(ctx, id, todo)
            .await
            .map_err(TodoError::store("update todo"))
    }

    pub async fn delete_todo_by_id(
        &self,
        ctx: &CancellationToken,
        id: TodoId,
    ) -> Result<(), TodoError> {
        self.repo
            .delete_by_id(ctx, id)
            .await
            .map_err(TodoError::store("delete todo"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{ErrorKind, StoreError, ValidationError};

    /// Repository double that counts calls and replays a canned failure.
    #[derive(Default)]
    struct RecordingRepository {
        fail_with: Option<StoreError>,
        save_calls: AtomicUsize,
        update_calls: AtomicUsize,
        last_saved: Mutex<Option<Todo>>,
    }

    impl RecordingRepository {
        fn failing(err: StoreError) -> Self {
            Self {
                fail_with: Some(err),
                ..Self::default()
            }
        }

        fn outcome<T>(&self, ok: T) -> Result<T, StoreError> {
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(ok),
            }
        }
    }

    #[async_trait]
    impl TodoRepository for RecordingRepository {
        async fn save(&self, _ctx: &CancellationToken, todo: Todo) -> Result<TodoId, StoreError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_saved.lock().unwrap() = Some(todo);
            self.outcome(1)
        }

        async fn get_by_id(
            &self,
            _ctx: &CancellationToken,
            id: TodoId,
        ) -> Result<Todo, StoreError> {
            let mut todo = Todo::new("stored");
            todo.id = id;
            self.outcome(todo)
        }

        async fn update_by_id(
            &self,
            _ctx: &CancellationToken,
            _id: TodoId,
            _todo: Todo,
        ) -> Result<(), StoreError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.outcome(())
        }

        async fn delete_by_id(
            &self,
            _ctx: &CancellationToken,
            _id: TodoId,
        ) -> Result<(), StoreError> {
            self.outcome(())
        }

        async fn read_all(&self, _ctx: &CancellationToken) -> Result<Vec<Todo>, StoreError> {
            self.outcome(Vec::new())
        }
    }

    fn usecase(repo: &Arc<RecordingRepository>) -> TodoUseCase {
        TodoUseCase::new(repo.clone())
    }

    #[tokio::test]
    async fn create_delegates_valid_todo_to_save() {
        let repo = Arc::new(RecordingRepository::default());
        let ctx = CancellationToken::new();

        let id = usecase(&repo)
            .create_todo(&ctx, Todo::new("complete the game"))
            .await
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(repo.save_calls.load(Ordering::SeqCst), 1);
        let saved = repo.last_saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.title, "complete the game");
    }

    #[tokio::test]
    async fn create_rejects_empty_title_without_saving() {
        let repo = Arc::new(RecordingRepository::default());
        let ctx = CancellationToken::new();

        let err = usecase(&repo)
            .create_todo(&ctx, Todo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TodoError::Validation(ValidationError::EmptyTitle)));
        assert_eq!(repo.save_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_rejects_empty_title_without_updating() {
        let repo = Arc::new(RecordingRepository::default());
        let ctx = CancellationToken::new();

        let err = usecase(&repo)
            .update_todo_by_id(&ctx, 1, Todo::new(""))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_wraps_store_failure_with_context() {
        let repo = Arc::new(RecordingRepository::failing(StoreError::Internal(
            "failed to save todo".into(),
        )));
        let ctx = CancellationToken::new();

        let err = usecase(&repo)
            .create_todo(&ctx, Todo::new("read the book"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_string(), "save todo: storage failure: failed to save todo");
        assert_eq!(repo.save_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_survives_wrapping() {
        let repo = Arc::new(RecordingRepository::failing(StoreError::NotFound));
        let ctx = CancellationToken::new();
        let uc = usecase(&repo);

        assert!(uc.get_todo_by_id(&ctx, 5).await.unwrap_err().is_not_found());
        assert!(uc
            .update_todo_by_id(&ctx, 5, Todo::new("x"))
            .await
            .unwrap_err()
            .is_not_found());
        assert!(uc.delete_todo_by_id(&ctx, 5).await.unwrap_err().is_not_found());
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancellation_survives_wrapping() {
        let repo = Arc::new(RecordingRepository::failing(StoreError::Cancelled));
        let ctx = CancellationToken::new();

        let err = usecase(&repo).get_all_todos(&ctx).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.store_error(), Some(&StoreError::Cancelled));
    }

    #[tokio::test]
    async fn get_returns_store_record_unchanged() {
        let repo = Arc::new(RecordingRepository::default());
        let ctx = CancellationToken::new();

        let todo = usecase(&repo).get_todo_by_id(&ctx, 3).await.unwrap();
        assert_eq!(todo.id, 3);
        assert_eq!(todo.title, "stored");
    }
}
