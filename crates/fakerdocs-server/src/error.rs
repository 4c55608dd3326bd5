//! Server error type.

use std::net::AddrParseError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fakerdocs_site::{PreferenceError, SiteError, UnknownTheme};
use serde::Serialize;

/// Server error.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Site failed startup validation.
    #[error("Invalid site configuration: {0}")]
    Site(#[from] SiteError),
    /// Bind address could not be parsed.
    #[error("Invalid bind address: {0}")]
    Address(#[from] AddrParseError),
    /// Listener or connection I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Request named a theme that doesn't exist.
    #[error(transparent)]
    InvalidTheme(#[from] UnknownTheme),
    /// Theme preference could not be persisted.
    #[error("Failed to store theme preference: {0}")]
    Preference(#[from] PreferenceError),
    /// Blocking store task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// No API endpoint at this path.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// JSON error body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTheme(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Site(_)
            | Self::Address(_)
            | Self::Io(_)
            | Self::Preference(_)
            | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
