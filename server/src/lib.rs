//! HTTP front end for the todo service.
//!
//! # Overview
//! Thin axum layer over `todo_core::TodoUseCase`: handlers decode JSON and
//! path ids, call the use case, and map `TodoError::kind` onto status codes.
//!
//! # Design
//! - `AppState` carries the use case and a root `CancellationToken`. Each
//!   request works under a child token, so once shutdown starts, requests
//!   that reach the store are turned away with 503 instead of mutating it.
//! - `serve` runs until the root token is cancelled, then gives in-flight
//!   requests `shutdown_grace` to finish.

pub mod config;
pub mod error;
pub mod handlers;
pub mod shutdown;
pub mod telemetry;

use std::future::IntoFuture;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinError;
use todo_core::{CancellationToken, MemoryTodoRepository, TodoUseCase};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use config::ServerConfig;

/// Collection route; single items live under `{TODOS_PATH}/{id}`.
pub const TODOS_PATH: &str = "/api/todos";
const TODO_PATH: &str = "/api/todos/{id}";

#[derive(Clone, Debug)]
pub struct AppState {
    pub usecase: TodoUseCase,
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(usecase: TodoUseCase) -> Self {
        Self {
            usecase,
            shutdown: CancellationToken::new(),
        }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(TodoUseCase::new(Arc::new(MemoryTodoRepository::new())))
    }

    /// Root token; cancelling it starts shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub(crate) fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}

pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ]);

    Router::new()
        .route(
            TODOS_PATH,
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            TODO_PATH,
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Serves `app` until `shutdown` is cancelled, then waits at most `grace`
/// for open connections to drain.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> io::Result<()> {
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    let mut server = tokio::spawn(server);

    tokio::select! {
        joined = &mut server => return flatten(joined),
        () = shutdown.cancelled() => tracing::info!("shutting down server"),
    }

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            tracing::warn!(?grace, "graceful shutdown timed out, dropping open connections");
            server.abort();
            Ok(())
        }
    }
}

pub async fn run(listener: TcpListener, state: AppState, config: &ServerConfig) -> io::Result<()> {
    let shutdown = state.shutdown_token();
    serve(listener, app(state, config), shutdown, config.shutdown_grace).await
}

fn flatten(joined: Result<io::Result<()>, JoinError>) -> io::Result<()> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(io::Error::other(e)),
    }
}
