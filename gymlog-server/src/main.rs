use anyhow::{Context, Result};
use gymlog::Tracker;
use gymlog::auth::TokenSigner;
use gymlog::logging::init_logger;
use gymlog_server::config::ServerConfig;
use gymlog_server::{AppState, bootstrap, build_router};
use log::{info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;
    init_logger(config.log_level);

    if config.uses_dev_secret() {
        warn!("GYMLOG_TOKEN_SECRET is not set; using the development secret");
    }
    let signer = TokenSigner::new(&config.token_secret, config.token_ttl_secs)?;
    let tracker = Tracker::open(&config.database_url, config.pool_size, signer)
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    bootstrap(&tracker, &config).await?;

    let app = build_router(AppState::new(tracker));
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!("gymlog-server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("gymlog-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
