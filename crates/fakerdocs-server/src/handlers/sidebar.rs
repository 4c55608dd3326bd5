//! Sidebar visibility toggle.
//!
//! Visibility lives in a cookie so the sidebar keeps its state across full
//! page loads without script. The cookie records whether the sidebar is open
//! and the path it was last toggled on, which is what the close-on-navigate
//! policy compares against.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Redirect, Response};
use fakerdocs_site::LayoutFrame;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Deserialize;

use crate::state::AppState;

/// Cookie holding sidebar visibility.
pub(crate) const SIDEBAR_COOKIE: &str = "fakerdocs-sidebar";

/// Characters kept verbatim in paths written to headers.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Sidebar state carried between requests.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SidebarCookie {
    pub(crate) open: bool,
    pub(crate) path: String,
}

impl SidebarCookie {
    /// Find and parse the sidebar cookie. Malformed values are ignored.
    pub(crate) fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SIDEBAR_COOKIE)
            .and_then(|(_, value)| Self::parse(value))
    }

    fn parse(value: &str) -> Option<Self> {
        let (state, path) = value.split_once('|')?;
        let open = match state {
            "open" => true,
            "closed" => false,
            _ => return None,
        };
        let path = percent_decode_str(path).decode_utf8().ok()?.into_owned();
        Some(Self { open, path })
    }

    /// `Set-Cookie` header value.
    pub(crate) fn to_header(&self) -> String {
        let state = if self.open { "open" } else { "closed" };
        format!(
            "{SIDEBAR_COOKIE}={state}|{}; Path=/; SameSite=Lax; HttpOnly",
            encode_path(&self.path)
        )
    }
}

fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ENCODE_SET).to_string()
}

/// Frame for `path`, restoring visibility from the cookie.
pub(crate) fn layout_frame(
    cookie: Option<SidebarCookie>,
    path: &str,
    close_on_navigate: bool,
) -> LayoutFrame {
    let mut frame = match cookie {
        Some(cookie) => LayoutFrame::new(cookie.path).with_sidebar_open(cookie.open),
        None => LayoutFrame::new(path),
    }
    .with_close_on_navigate(close_on_navigate);
    frame.navigate(path);
    frame
}

/// Query parameters for GET /-/sidebar/toggle.
#[derive(Deserialize)]
pub(crate) struct ToggleQuery {
    /// Path to return to after toggling.
    #[serde(rename = "return")]
    return_to: Option<String>,
}

/// Only local absolute paths are valid redirect targets.
fn return_target(return_to: Option<String>) -> String {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/".to_owned(),
    }
}

/// Handle GET /-/sidebar/toggle.
pub(crate) async fn toggle_sidebar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ToggleQuery>,
    headers: HeaderMap,
) -> Response {
    let target = return_target(query.return_to);
    let mut frame = layout_frame(
        SidebarCookie::from_headers(&headers),
        &target,
        state.close_sidebar_on_navigate,
    );
    let open = frame.toggle_sidebar();
    tracing::debug!(path = %target, open, "Sidebar toggled");

    let cookie = SidebarCookie { open, path: target };
    (
        [(header::SET_COOKIE, cookie.to_header())],
        Redirect::to(&encode_path(&cookie.path)),
    )
        .into_response()
}
