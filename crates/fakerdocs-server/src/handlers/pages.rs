//! Pages API endpoint.
//!
//! Renders the page selected for a path and returns its HTML and snippets
//! as JSON. Unknown paths return the not-found page with `matched: false`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use fakerdocs_site::Snippet;
use md5::{Digest, Md5};
use serde::Serialize;

use crate::handlers::to_url_path;
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Serialize)]
struct PageResponse {
    /// Page title.
    title: String,
    /// URL path that was requested.
    path: String,
    /// False when the not-found page was served.
    matched: bool,
    /// Rendered HTML content.
    content: String,
    /// Copyable snippets in document order.
    snippets: Vec<Snippet>,
}

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    get_page_impl("/", &state, &headers)
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    get_page_impl(&to_url_path(&path), &state, &headers)
}

/// Shared implementation for page rendering.
fn get_page_impl(path: &str, state: &AppState, headers: &HeaderMap) -> Response {
    let page = state.site.render(path);

    let etag = compute_etag(&state.version, &page.html);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    let response = PageResponse {
        title: page.title,
        path: path.to_owned(),
        matched: page.matched,
        content: page.html,
        snippets: page.snippets,
    };

    (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(response),
    )
        .into_response()
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
