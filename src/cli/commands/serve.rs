use anyhow::Context;
use tokio::net::TcpListener;

use crate::app::{app, AppState};
use crate::config::AppConfig;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();
    tracing::info!(
        "Starting Plant Tracker API in {:?} mode ({} storage)",
        config.environment,
        backend_label(&config)
    );

    let state = AppState::from_config(config)
        .await
        .context("failed to initialize storage")?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Plant Tracker API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn backend_label(config: &AppConfig) -> &'static str {
    match config.database.backend {
        crate::config::StorageBackend::Postgres => "postgres",
        crate::config::StorageBackend::Memory => "memory",
    }
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolves once `signal` fires. If the listener can't be installed the
/// server keeps running rather than stopping immediately.
async fn wait_for_signal(signal: impl std::future::Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
