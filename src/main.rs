use std::env;

use adjustment_engine::api::{AppState, create_router};
use adjustment_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_DIR_VAR: &str = "ADJUSTMENT_ENGINE_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .inspect_err(|e| error!(config_dir = %config_dir, "Failed to load configuration: {}", e))?;
    info!(
        config_dir = %config_dir,
        engine = %config.settings().name,
        components = config.config().components().len(),
        "Configuration loaded"
    );

    let bind_address = config.bind_address().to_string();
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .inspect_err(|e| error!(bind_address = %bind_address, "Failed to bind: {}", e))?;
    info!(bind_address = %bind_address, "Adjustment engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
