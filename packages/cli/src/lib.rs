// ABOUTME: TaskMind server and command runner
// ABOUTME: Logging setup, router assembly with CORS and tracing layers, and server startup

use std::net::SocketAddr;
use std::path::Path;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use taskmind_ai::AIConfig;
use taskmind_api::{create_router, AppState};
use taskmind_storage::{connect, SqlitePool};

pub mod commands;
pub mod config;

use config::{Config, ConfigError};

/// Initialise the global tracing subscriber (`RUST_LOG`, default `info`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init();
}

/// Wrap the API router with CORS and request tracing
pub fn build_app(state: AppState, cors_origin: &str) -> Result<Router, ConfigError> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidCorsOrigin(cors_origin.to_string()))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    Ok(create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn open_database(path: &Path) -> anyhow::Result<SqlitePool> {
    info!("Opening database at {}", path.display());
    Ok(connect(path).await?)
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let pool = open_database(&config.database_path).await?;
    let ai_config = AIConfig::from_env();
    if ai_config.api_key.is_none() {
        info!("OPENAI_API_KEY not set - suggestions and extraction will use defaults");
    }

    let app = build_app(AppState::new(pool, ai_config), &config.cors_origin)?;

    let addr = SocketAddr::new(config.host, config.port);
    info!("Server listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
