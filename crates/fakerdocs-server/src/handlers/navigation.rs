//! Navigation API endpoint.
//!
//! Returns the sidebar sections with the requested path highlighted.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use fakerdocs_site::SidebarSection;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Query parameters for GET /api/navigation.
#[derive(Deserialize)]
pub(crate) struct NavigationQuery {
    /// Current path; defaults to `/`.
    path: Option<String>,
}

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Sections in first-seen order.
    sections: Vec<SidebarSection>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
) -> Json<NavigationResponse> {
    let path = query.path.as_deref().unwrap_or("/");
    Json(NavigationResponse {
        sections: state.site.sidebar(path),
    })
}
