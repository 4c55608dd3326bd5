//! HTML shell for every non-API path.
//!
//! Renders the layout frame around whichever page the route table selects.
//! Unknown paths get the not-found page with a 200 status. The path is
//! percent-decoded before matching, the same as the pages API capture.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::error::ServerError;
use crate::handlers::sidebar::{SidebarCookie, layout_frame};
use crate::state::AppState;

/// Fallback handler.
pub(crate) async fn render_shell(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    if path.starts_with("/api/") {
        return ServerError::NotFound(path.into_owned()).into_response();
    }
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let cookie = SidebarCookie::from_headers(&headers);
    let was_open = cookie.as_ref().map(|c| c.open);
    let frame = layout_frame(cookie, &path, state.close_sidebar_on_navigate);
    let html = frame.render(&state.site, state.theme.get());

    let mut response = ([(header::CACHE_CONTROL, "no-cache")], Html(html)).into_response();

    // Persist a close caused by navigation
    if was_open.is_some_and(|open| open != frame.sidebar_open()) {
        let cookie = SidebarCookie {
            open: frame.sidebar_open(),
            path: frame.current_path().to_owned(),
        };
        if let Ok(value) = cookie.to_header().parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}
