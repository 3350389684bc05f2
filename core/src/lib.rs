//! Store and use-case layer for the todo service.
//!
//! # Overview
//! `TodoUseCase` validates input and delegates to a `TodoRepository`.
//! `MemoryTodoRepository` is the in-process store: a single reader/writer
//! lock over an ordered map plus the id counter. Nothing here knows about
//! HTTP; the server crate maps `TodoError::kind` onto status codes.
//!
//! # Design
//! - The store is constructed explicitly and injected as
//!   `Arc<dyn TodoRepository>`; there is no global instance.
//! - Every call takes a `CancellationToken`, checked once at entry before
//!   any lock is taken or state is touched.
//! - Records cross layer boundaries by value, never by reference into the
//!   store's map.

pub mod error;
pub mod store;
pub mod types;
pub mod usecase;

pub use error::{ErrorKind, StoreError, TodoError, ValidationError};
pub use store::{MemoryTodoRepository, TodoRepository};
pub use types::{Todo, TodoId};
pub use usecase::TodoUseCase;

pub use tokio_util::sync::CancellationToken;
