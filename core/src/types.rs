//! Domain record for the todo service.
//!
//! # Design
//! A single `Todo` type travels through every layer: the store keeps owned
//! copies, the use case validates them, and the HTTP layer serializes them
//! as-is. All fields default so a body with a missing `title` decodes to an
//! empty string and is rejected by validation rather than by the decoder.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Store-assigned identifier. Starts at 1 and is never reused.
pub type TodoId = u64;

/// A single todo item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl Todo {
    /// Convenience constructor for a record that has not been stored yet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// A title must be present; nothing else is checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}
