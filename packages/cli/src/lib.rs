// ABOUTME: Atelier server assembly: router, middleware, tracing, and startup
// ABOUTME: Used by the `atelier` binary and by router tests

use axum::{http::Method, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use atelier_storage::PoolConfig;
use atelier_taxonomy::DbState;

pub mod api;
pub mod config;
pub mod error;
pub mod render;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};
pub use error::ServerError;

/// Install the global tracing subscriber (RUST_LOG, default `info`)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

/// Full application router with CORS and request tracing
pub fn create_app(db: DbState, config: &Config) -> Result<Router, ConfigError> {
    let cors = CorsLayer::new()
        .allow_origin(config.cors_header()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(api::create_router(db)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let db = DbState::init_with_path(&config.database_path, &PoolConfig::default()).await?;
    let app = create_app(db, &config)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
