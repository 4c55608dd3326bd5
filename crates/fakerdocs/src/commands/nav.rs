//! `fakerdocs nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use fakerdocs_site::SidebarItem;

use crate::commands::{load_config, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Current path to highlight.
    #[arg(long, default_value = "/")]
    path: String,

    /// Path to configuration file (default: auto-discover fakerdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl NavArgs {
    /// Print the sidebar sections with the active entry marked.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(self.config.as_deref())?;
        let site = load_site(&config)?;

        let sections = site.sidebar(&self.path);
        if !sections.iter().flat_map(|s| &s.items).any(|i| i.active) {
            output.warning(&format!("No navigation entry for {}", self.path));
        }

        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                output.data("");
            }
            output.heading(&section.name);
            for item in &section.items {
                let line = format_item(item);
                if item.active {
                    output.data_active(&line);
                } else {
                    output.data(&line);
                }
            }
        }

        Ok(())
    }
}

/// One sidebar line; the active entry gets a marker.
fn format_item(item: &SidebarItem) -> String {
    let marker = if item.active { '>' } else { ' ' };
    format!("{marker} {:<16} {}", item.title, item.href)
}
