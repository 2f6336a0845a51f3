pub mod api;
pub mod clients;
pub mod config;
pub mod middleware;
pub mod server;

use std::net::SocketAddr;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config: config::Config) -> Result<(), ServerError> {
    info!("Starting {} v{}", api::SERVICE_NAME, api::SERVICE_VERSION);
    if config.is_release() {
        info!("Running in release mode");
    }

    let addr: SocketAddr = format!("{}:{}", config.listen.address, config.listen.port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid listen address: {}", e)))?;

    let state = server::AppState::from_config(config);
    let app = server::build_router(state);

    info!("Serving HTTP on {}", addr);
    info!("Health check endpoint: /api/v1/health");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
