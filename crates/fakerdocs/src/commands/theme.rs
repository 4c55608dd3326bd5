//! `fakerdocs theme` subcommand group.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use fakerdocs_config::Config;
use fakerdocs_site::{FilePreferenceStore, Theme, ThemePreference};

use crate::commands::load_config;
use crate::error::CliError;
use crate::output::Output;

/// Theme preference commands.
#[derive(Subcommand)]
pub(crate) enum ThemeCommand {
    /// Print the stored theme.
    Get(ConfigArgs),
    /// Store a new theme.
    Set(SetArgs),
}

impl ThemeCommand {
    /// Execute the theme subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        match self {
            Self::Get(args) => {
                let preference = open_preference(&load_config(args.config.as_deref())?);
                output.data(preference.get().as_str());
            }
            Self::Set(args) => {
                let config = load_config(args.config.config.as_deref())?;
                let preference = open_preference(&config);
                preference.set(args.theme)?;
                output.success(&format!(
                    "Theme set to {} ({})",
                    args.theme,
                    config.theme_resolved.store_path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Shared configuration argument.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover fakerdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Arguments for `theme set`.
#[derive(Args)]
pub(crate) struct SetArgs {
    /// `light`, `dark` or `system`.
    theme: Theme,

    #[command(flatten)]
    config: ConfigArgs,
}

fn open_preference(config: &Config) -> ThemePreference {
    let theme = &config.theme_resolved;
    ThemePreference::new(
        Arc::new(FilePreferenceStore::new(&theme.store_path)),
        theme.storage_key.clone(),
        theme.default.parse().unwrap_or_default(),
    )
}
