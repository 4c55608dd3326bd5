//! Theme preference API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use fakerdocs_site::Theme;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET/PUT /api/theme.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThemeResponse {
    /// Current theme.
    theme: Theme,
    /// Key the preference is persisted under.
    storage_key: String,
}

/// Body for PUT /api/theme.
#[derive(Deserialize)]
pub(crate) struct ThemeUpdate {
    /// `light`, `dark` or `system`.
    theme: String,
}

fn current(state: &AppState) -> ThemeResponse {
    ThemeResponse {
        theme: state.theme.get(),
        storage_key: state.theme.storage_key().to_owned(),
    }
}

/// Handle GET /api/theme.
pub(crate) async fn get_theme(State(state): State<Arc<AppState>>) -> Json<ThemeResponse> {
    Json(current(&state))
}

/// Handle PUT /api/theme.
///
/// The store write runs on the blocking pool.
pub(crate) async fn put_theme(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ThemeUpdate>,
) -> Result<Json<ThemeResponse>, ServerError> {
    let theme: Theme = update.theme.parse()?;
    let writer = Arc::clone(&state);
    tokio::task::spawn_blocking(move || writer.theme.set(theme)).await??;
    tracing::info!(theme = %theme, "Theme preference changed");
    Ok(Json(current(&state)))
}
