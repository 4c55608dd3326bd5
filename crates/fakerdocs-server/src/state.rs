//! Application state.
//!
//! Shared state for all request handlers.

use fakerdocs_site::{Site, ThemePreference};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Navigation, routes and pages.
    pub(crate) site: Site,
    /// Process-wide theme preference.
    pub(crate) theme: ThemePreference,
    /// Close the sidebar whenever the path changes.
    pub(crate) close_sidebar_on_navigate: bool,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}
