use std::path::PathBuf;

use anyhow::Context;
use booking_app::backend::config::{ConfigService, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use booking_app::{create_router, initialize_backend};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    info!("Loading configuration from {}", config_path.display());
    let config = ConfigService::load_config_or_default(&config_path);
    let bind_address = config.bind_address.clone();

    let app_state = initialize_backend(config).context("Failed to initialize backend")?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Booking server listening on {}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
