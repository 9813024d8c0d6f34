//! Shop route handlers.
//!
//! Shop reads are remote-only: the static snapshot carries no shops, so in
//! fallback mode these respond 503 rather than degrading. The optional
//! `owner` query narrows to shops owned by a user identity supplied by the
//! external auth collaborator.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use nui_market_core::{Shop, UserId};

use crate::error::Result;
use crate::state::AppState;

/// Query parameters for the shop listing.
#[derive(Debug, Deserialize)]
pub struct ShopListQuery {
    pub owner: Option<UserId>,
}

/// List shops, optionally narrowed to one owner.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ShopListQuery>,
) -> Result<Json<Vec<Shop>>> {
    let shops = match &query.owner {
        Some(owner) => state.resolver().list_shops_by_owner(owner).await?,
        None => state.resolver().list_shops().await?,
    };
    Ok(Json(shops))
}
