use anyhow::Context;
use std::sync::Arc;

use boardserver::config::AppConfig;
use boardserver::shared::state::AppState;
use boardserver::shared::utils::create_conn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    let pool = create_conn(&config.database_url).context("Failed to create database pool")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState {
        conn: pool,
        config: config.clone(),
    });

    log::info!("Starting HTTP server on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, boardserver::app(state))
        .await
        .context("Server error")?;
    Ok(())
}
