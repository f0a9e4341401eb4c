//! Space Chat - HTTP Server Entry Point
//!
//! Starts the HTTP server that serves the chat page and API.

use space_chat::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // API keys may live in a local .env file
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "space_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.default_model);
    if config.space_apis.nasa_api_key.is_none() {
        tracing::warn!("NASA_API_KEY is not set; NASA tools will fail at request time");
    }
    if config.space_apis.weather_api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY is not set; the moon phase tool will fail at request time");
    }

    // Start HTTP server
    info!("Starting server on {}:{}", config.host, config.port);
    api::serve(config).await?;

    Ok(())
}
