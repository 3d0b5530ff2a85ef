use anyhow::Context;
use tracing_subscriber::EnvFilter;
use wordsearch_gateway::api::{AppState, build_router};
use wordsearch_gateway::config::Config;
use wordsearch_gateway::engine::Engine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Unhandled panic: {}", info);
    }));

    // 1. Configuration:
    let config = Config::from_env().context("invalid configuration")?;
    tracing::info!(
        "Engine {} (replica: {}), index '{}'",
        config.primary_url,
        config.replica_url.as_deref().unwrap_or("none"),
        config.index_name
    );

    // 2. Engine clients:
    let engine = Engine::from_config(&config)?;

    if config.ensure_index
        && let Err(e) = engine.ensure_index().await
    {
        tracing::warn!("Continuing without index bootstrap: {}", e);
    }

    // 3. HTTP Router:
    let app = build_router(AppState::new(engine));

    // 4. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Backend server is running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
