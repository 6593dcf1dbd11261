use anyhow::Context;
use tracing::info;

use recipe_server::build_router;
use recipe_server::config::AppConfig;
use recipe_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::from_config(config).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
