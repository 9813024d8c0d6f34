//! Administrative write route handlers.
//!
//! This is the catalog mutator's HTTP surface, consumed by the external
//! admin UI. Every failure is surfaced to the caller unchanged in meaning:
//! 503 when the backend is unavailable, 422 for backend validation
//! rejections, 502 for remote failures. Nothing here emits host channel
//! notifications.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use nui_market_core::{
    NewProduct, NewShop, Product, ProductId, ProductPatch, Shop, ShopId, ShopPatch,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create a product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let created = state.mutator().create_product(&product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a product.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    if patch.is_empty() {
        return Err(AppError::BadRequest("empty product update".to_string()));
    }
    let updated = state.mutator().update_product(&id, &patch).await?;
    Ok(Json(updated))
}

/// Delete a product.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    state.mutator().delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a shop.
pub async fn create_shop(
    State(state): State<AppState>,
    Json(shop): Json<NewShop>,
) -> Result<(StatusCode, Json<Shop>)> {
    let created = state.mutator().create_shop(&shop).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a shop.
pub async fn update_shop(
    State(state): State<AppState>,
    Path(id): Path<ShopId>,
    Json(patch): Json<ShopPatch>,
) -> Result<Json<Shop>> {
    if patch.is_empty() {
        return Err(AppError::BadRequest("empty shop update".to_string()));
    }
    let updated = state.mutator().update_shop(&id, &patch).await?;
    Ok(Json(updated))
}

/// Delete a shop.
pub async fn delete_shop(
    State(state): State<AppState>,
    Path(id): Path<ShopId>,
) -> Result<StatusCode> {
    state.mutator().delete_shop(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
