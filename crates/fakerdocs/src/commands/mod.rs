//! CLI command implementations.

pub(crate) mod nav;
pub(crate) mod serve;
pub(crate) mod snippets;
pub(crate) mod theme;

use std::future::Future;
use std::path::Path;

use fakerdocs_config::Config;
use fakerdocs_site::{Site, SiteConfig};

use crate::error::CliError;

pub(crate) use nav::NavArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use snippets::SnippetsCommand;
pub(crate) use theme::ThemeCommand;

/// Build the documentation site using the site identity from `config`.
pub(crate) fn load_site(config: &Config) -> Result<Site, CliError> {
    let site = Site::builtin(SiteConfig {
        title: config.site.title.clone(),
        repository_url: config.site.repository_url.clone(),
    })?;
    Ok(site)
}

/// Load configuration without CLI overrides.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    Ok(Config::load(path, None)?)
}

/// Run `future` to completion on a fresh multi-threaded runtime.
pub(crate) fn block_on<F>(future: F) -> Result<(), CliError>
where
    F: Future<Output = Result<(), CliError>>,
{
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}
