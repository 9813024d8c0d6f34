//! Category route handlers.

use axum::{Json, extract::State};

use nui_market_core::CategoryTree;

use crate::state::AppState;

/// List categories with their subcategories and derived product counts.
///
/// Served from the static snapshot when the backend is unavailable or the
/// remote query fails; the response shape is identical either way.
pub async fn index(State(state): State<AppState>) -> Json<Vec<CategoryTree>> {
    Json(state.resolver().list_categories().await)
}
