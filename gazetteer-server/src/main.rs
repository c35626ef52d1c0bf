use anyhow::Context;
use tracing_subscriber::EnvFilter;

use gazetteer_server::config::ServerConfig;
use gazetteer_server::store::{LoadOutcome, SqliteStore, Store};
use gazetteer_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gazetteer_server=debug,tower_http=debug")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store = SqliteStore::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;

    // Import once; later starts reuse the existing table.
    match store.load_if_empty(&config.source_path).await? {
        LoadOutcome::Loaded { rows } => {
            tracing::info!(rows, source = %config.source_path.display(), "dataset imported")
        }
        LoadOutcome::Skipped => tracing::info!("dataset already loaded"),
    }
    let total = store.count().await?;

    let addr = config.bind_address();
    let state = AppState::new(store.clone(), config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, places = total, "gazetteer listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
