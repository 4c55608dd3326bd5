//! CLI error types.

use fakerdocs_config::ConfigError;
use fakerdocs_server::ServerError;
use fakerdocs_site::{ClipboardError, PreferenceError, SiteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("{0}")]
    Clipboard(#[from] ClipboardError),

    #[error("{0}")]
    Preference(#[from] PreferenceError),

    #[error("{0}")]
    Validation(String),
}
