use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::{shutdown, telemetry, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();
    let config = ServerConfig::from_env()?;

    // Volatile store: everything is lost on restart.
    let state = AppState::in_memory();
    shutdown::cancel_on_signal(state.shutdown_token());

    let addr = config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "starting server");

    todo_server::run(listener, state, &config)
        .await
        .context("server failed")?;

    tracing::info!("server stopped");
    Ok(())
}
