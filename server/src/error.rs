//! Mapping from use-case failures to HTTP responses.
//!
//! # Design
//! Bodies are short plain-text messages; the detailed error only goes to the
//! log. The status is chosen from `TodoError::kind`, so wrapping inside the
//! use case never changes what the client sees.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use todo_core::{ErrorKind, TodoError};

#[derive(Debug)]
pub enum ApiError {
    /// Malformed path or body, rejected before the use case runs.
    BadRequest(String),
    /// A use-case call failed.
    Todo(TodoError),
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        ApiError::Todo(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Todo(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn public_message(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "todo not found",
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::SERVICE_UNAVAILABLE => "service unavailable",
            _ => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(reason) => tracing::warn!(%reason, "rejected request"),
            ApiError::Todo(err) => match err.kind() {
                ErrorKind::Internal => tracing::error!(error = %err, "request failed"),
                ErrorKind::Cancelled => tracing::info!(error = %err, "request abandoned"),
                ErrorKind::Validation | ErrorKind::NotFound => {
                    tracing::warn!(error = %err, "request failed")
                }
            },
        }
        (status, self.public_message()).into_response()
    }
}
