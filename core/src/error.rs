//! Error types for the todo store and use case.
//!
//! # Design
//! `StoreError` is what a `TodoRepository` reports. `TodoError` is what the
//! use case reports: it either rejects input up front (`Validation`) or wraps
//! a store failure with the name of the operation that failed. Wrapping never
//! hides the store failure's identity; `TodoError::kind` recovers it so the
//! HTTP layer can still tell "not found" and "cancelled" apart from an
//! internal fault.

use thiserror::Error;

/// Failures reported by a `TodoRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the requested id exists.
    #[error("todo with specified id does not exist")]
    NotFound,

    /// The caller's cancellation token fired before the operation started.
    #[error("operation cancelled")]
    Cancelled,

    /// Any other storage failure.
    #[error("storage failure: {0}")]
    Internal(String),
}

/// Input rejected before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is empty")]
    EmptyTitle,
}

/// Coarse classification of a `TodoError`, stable across wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Cancelled,
    Internal,
}

/// Errors returned by `TodoUseCase`.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("validate todo: {0}")]
    Validation(#[from] ValidationError),

    #[error("{op}: {source}")]
    Store {
        op: &'static str,
        #[source]
        source: StoreError,
    },
}

impl TodoError {
    pub(crate) fn store(op: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { op, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) => ErrorKind::Validation,
            TodoError::Store { source, .. } => match source {
                StoreError::NotFound => ErrorKind::NotFound,
                StoreError::Cancelled => ErrorKind::Cancelled,
                StoreError::Internal(_) => ErrorKind::Internal,
            },
        }
    }

    /// The underlying store failure, if this error came from the store.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            TodoError::Store { source, .. } => Some(source),
            TodoError::Validation(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancelled
    }
}
