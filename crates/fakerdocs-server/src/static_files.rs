//! Embedded shell assets.
//!
//! The stylesheet and script are compiled into the binary and served with
//! their content type.

use std::sync::Arc;

use axum::Router;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

const SHELL_CSS: &str = include_str!("../assets/shell.css");
const SHELL_JS: &str = include_str!("../assets/shell.js");

const CACHE_CONTROL: &str = "public, max-age=3600";

/// Create router for the embedded assets.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets/shell.css", get(serve_css))
        .route("/assets/shell.js", get(serve_js))
}

async fn serve_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        SHELL_CSS,
    )
}

async fn serve_js() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        SHELL_JS,
    )
}
