//! HTTP server for the MediBusca directory.
//!
//! This crate serves the whole site with axum:
//! - server-rendered listing pages under `/doctores`
//! - informational disease pages under `/enfermedades`
//! - the search results page and the JSON autocomplete endpoint
//! - a JSON health probe
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (mb-server)
//!                        │
//!                        ├─► resolver (mb-directory) ── PageIntent
//!                        │
//!                        ├─► doctor queries (mb-store, off the async runtime)
//!                        │
//!                        └─► HTML rendering (mb-site)
//! ```
//!
//! Handlers resolve the path first; only resolved intents reach the data
//! store, and store failures never change what a path means.

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use mb_directory::ReferenceDataset;
use mb_site::SiteContext;
use mb_store::DirectoryStore;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site name shown in titles and the header.
    pub site_name: String,
    /// Application version (for cache validation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            site_name: "MediBusca".to_string(),
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
/// * `dataset` - Compiled reference dataset
/// * `store` - Doctor record store
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(
    config: ServerConfig,
    dataset: Arc<ReferenceDataset>,
    store: Arc<dyn DirectoryStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        dataset,
        store,
        site: SiteContext {
            site_name: config.site_name.clone(),
        },
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
