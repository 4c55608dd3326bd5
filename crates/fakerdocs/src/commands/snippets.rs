//! `fakerdocs snippets` subcommand group.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use fakerdocs_site::{Snippet, SnippetState, SystemClipboard};

use crate::commands::{block_on, load_config, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Code snippet commands.
#[derive(Subcommand)]
pub(crate) enum SnippetsCommand {
    /// List the code snippets on a page.
    List(ListArgs),
    /// Copy a snippet to the system clipboard.
    Copy(CopyArgs),
}

impl SnippetsCommand {
    /// Execute the snippets subcommand.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        match self {
            Self::List(args) => args.execute(),
            Self::Copy(args) => block_on(args.execute()),
        }
    }
}

/// Arguments for `snippets list`.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Page path, e.g. `/installation`.
    path: String,

    /// Path to configuration file (default: auto-discover fakerdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ListArgs {
    fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = load_site(&load_config(self.config.as_deref())?)?;

        let page = site.render(&self.path);
        if !page.matched {
            output.warning(&format!("No page at {}, showing '{}'", self.path, page.title));
        }
        if page.snippets.is_empty() {
            output.info(&format!("{} has no code snippets", page.title));
            return Ok(());
        }

        for snippet in &page.snippets {
            output.heading(&describe(snippet));
            for line in snippet.code.lines() {
                output.data_dim(&format!("    {line}"));
            }
        }

        Ok(())
    }
}

/// Arguments for `snippets copy`.
#[derive(Args)]
pub(crate) struct CopyArgs {
    /// Page path, e.g. `/installation`.
    path: String,

    /// Snippet index as shown by `snippets list`.
    index: usize,

    /// Path to configuration file (default: auto-discover fakerdocs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CopyArgs {
    /// Copy the snippet and hold until the copied state resets.
    async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = load_config(self.config.as_deref())?;
        let site = load_site(&config)?;

        let page = site.render(&self.path);
        let snippet = page.snippets.get(self.index).ok_or_else(|| {
            CliError::Validation(format!(
                "{} has {} snippet(s), no index {}",
                page.title,
                page.snippets.len(),
                self.index
            ))
        })?;

        let mut state = SnippetState::with_reset_delay(
            SystemClipboard,
            Duration::from_millis(config.snippets.reset_ms),
        );
        let mut copied = state.subscribe();

        state.copy(&snippet.code).await?;
        output.success(&format!("Copied {}", describe(snippet)));

        if copied.wait_for(|copied| !*copied).await.is_ok() {
            tracing::debug!(index = snippet.index, "Snippet copy state reset");
        }

        Ok(())
    }
}

/// `[index] language: title` heading for a snippet.
fn describe(snippet: &Snippet) -> String {
    match &snippet.title {
        Some(title) => format!("[{}] {}: {title}", snippet.index, snippet.language),
        None => format!("[{}] {}", snippet.index, snippet.language),
    }
}
