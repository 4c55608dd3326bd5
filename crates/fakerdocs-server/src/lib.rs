//! HTTP server for the faker-api documentation shell.
//!
//! This crate serves the documentation with axum:
//! - Server-rendered HTML pages inside the layout frame
//! - JSON API endpoints for navigation, page content and the theme preference
//! - Embedded stylesheet and script for the shell
//!
//! # Quick Start
//!
//! ```no_run
//! use fakerdocs_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fakerdocs_server::ServerError> {
//!     let config = ServerConfig {
//!         port: 8080,
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (fakerdocs-server)
//!                        │
//!                        ├─► /api/* (JSON handlers) ──► Site, ThemePreference
//!                        │
//!                        ├─► /-/sidebar/toggle (cookie + redirect)
//!                        │
//!                        ├─► /assets/* (embedded)
//!                        │
//!                        └─► any other GET ──► LayoutFrame ──► HTML
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use fakerdocs_site::{FilePreferenceStore, Site, SiteConfig, Theme, ThemePreference};

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Site identity shown in the header.
    pub site: SiteConfig,
    /// File holding the persisted theme preference.
    pub theme_store_path: PathBuf,
    /// Key the theme preference is stored under.
    pub theme_storage_key: String,
    /// Theme used until the user picks one.
    pub theme_default: Theme,
    /// Close the sidebar whenever the path changes.
    pub close_sidebar_on_navigate: bool,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            site: SiteConfig::default(),
            theme_store_path: PathBuf::from(".fakerdocs/preferences.json"),
            theme_storage_key: "faker-api-theme".to_owned(),
            theme_default: Theme::System,
            close_sidebar_on_navigate: false,
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the site fails validation, the address is invalid,
/// or the listener cannot be bound.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let site = Site::builtin(config.site.clone())?;

    let store = Arc::new(FilePreferenceStore::new(&config.theme_store_path));
    let theme = ThemePreference::new(store, config.theme_storage_key.clone(), config.theme_default);

    let state = Arc::new(AppState {
        site,
        theme,
        close_sidebar_on_navigate: config.close_sidebar_on_navigate,
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
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded config file.
#[must_use]
pub fn server_config_from_config(config: &fakerdocs_config::Config, version: String) -> ServerConfig {
    let theme = &config.theme_resolved;

    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        site: SiteConfig {
            title: config.site.title.clone(),
            repository_url: config.site.repository_url.clone(),
        },
        theme_store_path: theme.store_path.clone(),
        theme_storage_key: theme.storage_key.clone(),
        theme_default: theme.default.parse().unwrap_or_default(),
        close_sidebar_on_navigate: config.layout.close_sidebar_on_navigate,
        version,
    }
}
