//! Axum handlers: decode the request, call the use case, encode the result.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use todo_core::{Todo, TodoId};

use crate::error::ApiError;
use crate::AppState;

/// Body of a successful create.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Created {
    pub id: TodoId,
}

/// Body of a successful update.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
}

fn path_id(id: Result<Path<TodoId>, PathRejection>) -> Result<TodoId, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::BadRequest(format!("invalid todo id: {e}")))
}

fn json_body(body: Result<Json<Todo>, JsonRejection>) -> Result<Todo, ApiError> {
    body.map(|Json(todo)| todo)
        .map_err(|e| ApiError::BadRequest(format!("failed to decode request: {e}")))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<Todo>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = json_body(body)?;
    let ctx = state.request_token();

    let id = state.usecase.create_todo(&ctx, todo).await?;
    tracing::info!(id, "todo created");

    let location = format!("{}/{id}", crate::TODOS_PATH);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(Created { id }),
    ))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let ctx = state.request_token();
    Ok(Json(state.usecase.get_all_todos(&ctx).await?))
}

pub async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = path_id(id)?;
    let ctx = state.request_token();
    Ok(Json(state.usecase.get_todo_by_id(&ctx, id).await?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
    body: Result<Json<Todo>, JsonRejection>,
) -> Result<Json<StatusMessage>, ApiError> {
    let id = path_id(id)?;
    let todo = json_body(body)?;
    let ctx = state.request_token();

    state.usecase.update_todo_by_id(&ctx, id, todo).await?;
    tracing::info!(id, "todo updated");

    Ok(Json(StatusMessage {
        message: "todo successfully updated".to_string(),
    }))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    let ctx = state.request_token();

    state.usecase.delete_todo_by_id(&ctx, id).await?;
    tracing::info!(id, "todo deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn health() -> &'static str {
    "OK"
}
