//! HTTP dev server for Hotpage.
//!
//! Serves a site directory over plain HTTP and, when live reload is
//! enabled, watches the directory for changes and tells connected pages to
//! refresh through the `/__hotreload` WebSocket endpoint.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use hotpage_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7878,
//!         source_dir: PathBuf::from("site"),
//!         live_reload_enabled: true,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Page ──HTTP──► axum (hotpage-server)
//!                    │
//!                    ├─► Static files (tower-http ServeDir)
//!                    │
//!                    └─► WebSocket /__hotreload
//!                            │
//!                            └─► notify watcher ─► debouncer ─► broadcast
//! ```

mod app;
mod error;
mod live_reload;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site directory to serve and watch.
    pub source_dir: PathBuf,
    /// Enable live reload.
    pub live_reload_enabled: bool,
    /// Watch patterns for live reload.
    pub watch_patterns: Option<Vec<String>>,
    /// Debounce window for filesystem events, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            source_dir: PathBuf::from("site"),
            live_reload_enabled: false,
            watch_patterns: None,
            debounce_ms: 100,
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the file watcher cannot be created or the server
/// fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    // Create live reload manager if enabled
    let live_reload = if config.live_reload_enabled {
        let (tx, _rx) = broadcast::channel::<live_reload::ReloadSignal>(100);
        let mut manager = live_reload::LiveReloadManager::new(
            config.source_dir.clone(),
            config.watch_patterns.clone(),
            tx,
        )
        .with_debounce(Duration::from_millis(config.debounce_ms));
        manager.start()?;
        Some(manager)
    } else {
        None
    };

    let state = Arc::new(AppState { live_reload });
    let app = app::create_router(state, &config.source_dir);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, site = %config.source_dir.display(), "Starting dev server");

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

/// Create server configuration from Hotpage config.
#[must_use]
pub fn server_config_from_config(config: &hotpage_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.site_resolved.source_dir.clone(),
        live_reload_enabled: config.live_reload.enabled,
        watch_patterns: config.live_reload.watch_patterns.clone(),
        debounce_ms: config.live_reload.debounce_ms,
    }
}
