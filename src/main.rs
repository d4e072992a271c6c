use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voice_gateway::infrastructure::config::{Config, LogFormat};
use voice_gateway::infrastructure::http::{create_app, start_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Voice Gateway on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        api_url = %config.cartesia_api_url,
        api_version = %config.cartesia_api_version,
        timeout_ms = config.cartesia_timeout_ms,
        max_attempts = config.cartesia_max_attempts,
        retry_base_delay_ms = config.cartesia_retry_base_delay_ms,
        environment = ?config.environment,
        "Cartesia upstream configured"
    );

    let config = Arc::new(config);

    let app = create_app(config.clone())?;

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voice_gateway=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voice_gateway=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
