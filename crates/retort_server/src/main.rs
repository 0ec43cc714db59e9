//! Relay server binary.

use retort_client::ApiConfig;
use retort_server::create_router;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ApiConfig::from_env();
    if !config.is_valid() {
        warn!(
            missing = ?config.missing_fields(),
            "endpoint configuration incomplete, generation requests will fail"
        );
    }

    let addr = std::env::var("RETORT_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "relay server listening");

    axum::serve(listener, create_router(config)).await?;
    Ok(())
}
