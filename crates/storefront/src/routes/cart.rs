//! Cart route handlers.
//!
//! Each mutation locks the cart session, applies the state transition, and
//! returns the resulting cart view. Host notifications are emitted by the
//! session itself; their delivery can never fail a request. Products are
//! resolved before the cart lock is taken so the guard is never held across
//! an await point.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nui_market_core::{CartLine, ProductId};

use crate::cart::CartSession;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart state returned to the overlay.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub count: u32,
    pub total: Decimal,
}

impl From<&CartSession> for CartView {
    fn from(cart: &CartSession) -> Self {
        Self {
            items: cart.lines().to_vec(),
            count: cart.total_items(),
            total: cart.subtotal(),
        }
    }
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: u32,
}

/// Current cart state.
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(&*state.cart()))
}

/// Add one unit of a product to the cart.
pub async fn add_item(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .resolver()
        .get_product(&request.product_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let mut cart = state.cart();
    cart.add(product);
    Ok(Json(CartView::from(&*cart)))
}

/// Replace a line's quantity; zero removes the line.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(request): Json<UpdateItemRequest>,
) -> Json<CartView> {
    let mut cart = state.cart();
    cart.set_quantity(&id, request.quantity);
    Json(CartView::from(&*cart))
}

/// Remove a line from the cart.
pub async fn remove_item(State(state): State<AppState>, Path(id): Path<ProductId>) -> Json<CartView> {
    let mut cart = state.cart();
    cart.remove(&id);
    Json(CartView::from(&*cart))
}

/// Empty the cart.
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut cart = state.cart();
    cart.clear();
    Json(CartView::from(&*cart))
}

/// Hand the cart to the host for checkout. The cart is left untouched; the
/// host decides what happens next.
pub async fn checkout(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart();
    cart.checkout();
    Json(CartView::from(&*cart))
}
