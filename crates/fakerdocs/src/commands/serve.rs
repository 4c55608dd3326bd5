//! `fakerdocs serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use fakerdocs_config::{CliSettings, Config};
use fakerdocs_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover fakerdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "FAKERDOCS_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "FAKERDOCS_PORT")]
    port: Option<u16>,

    /// File holding the theme preference (overrides config).
    #[arg(long)]
    theme_store: Option<PathBuf>,

    /// Enable verbose output (request and startup logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            theme_store_path: self.theme_store,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Theme preference: {}",
            config.theme_resolved.store_path.display()
        ));
        if config.layout.close_sidebar_on_navigate {
            output.info("Sidebar: closes on navigation");
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config).await?;

        Ok(())
    }
}
