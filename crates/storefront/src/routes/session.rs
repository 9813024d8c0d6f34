//! Overlay session route handlers.

use axum::{extract::State, http::StatusCode};
use serde_json::Value;

use crate::nui::action;
use crate::state::AppState;

/// Ask the host process to close the overlay. Best-effort: succeeds even
/// when no host is attached.
pub async fn close(State(state): State<AppState>) -> StatusCode {
    state.host().send(action::CLOSE_NUI, Value::Null);
    StatusCode::NO_CONTENT
}
