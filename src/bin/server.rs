//! Sky-Camera Dashboard Server Binary
//!
//! Entry point for the dashboard REST API. It loads configuration, opens the
//! capture database read-only, sets up the HTTP router, and starts serving.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin skycam-server
//! ```
//!
//! # Environment Variables
//!
//! - `SKYCAM_CONFIG`: Path to the TOML configuration file (default: search
//!   for `skycam.toml` in standard locations)
//! - `HOST`: Override the configured server host
//! - `PORT`: Override the configured server port
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use skycam_backend::config::AppConfig;
use skycam_backend::db::SqliteRepository;
use skycam_backend::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting sky-camera dashboard server");

    // Load configuration: explicit path first, then the default search, then
    // built-in defaults.
    let config = match env::var("SKYCAM_CONFIG") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::from_default_location().unwrap_or_else(|e| {
            warn!(error = %e, "using built-in default configuration");
            AppConfig::default()
        }),
    };

    // Open the capture database read-only
    let repository = Arc::new(SqliteRepository::open(&config.database.path)?);
    info!(
        database = %config.database.path.display(),
        archive = %config.archive.base_dir.display(),
        "repository initialized"
    );

    // Determine bind address (env overrides the config file)
    let host = env::var("HOST").unwrap_or_else(|_| config.server.host.clone());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Create application state and router
    let state = AppState::new(repository, Arc::new(config));
    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
