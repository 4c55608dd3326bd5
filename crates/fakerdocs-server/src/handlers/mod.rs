//! HTTP request handlers.

pub(crate) mod navigation;
pub(crate) mod pages;
pub(crate) mod shell;
pub(crate) mod sidebar;
pub(crate) mod theme;

/// Convert a wildcard capture (without leading slash) to a site path.
///
/// Axum captures `installation` for `/api/pages/installation`, but the
/// navigation registry keys pages by absolute path (`/installation`, `/`).
pub(crate) fn to_url_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_owned()
    } else {
        format!("/{path}")
    }
}
