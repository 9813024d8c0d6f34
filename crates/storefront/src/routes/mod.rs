//! Route handlers for the storefront JSON API.
//!
//! The overlay UI and the administrative UI are external collaborators;
//! everything here speaks JSON. Storefront reads go through the catalog
//! resolver (degrading transparently), cart routes drive the cart session,
//! and admin routes expose the catalog mutator's write surface.

pub mod admin;
pub mod cart;
pub mod categories;
pub mod products;
pub mod session;
pub mod shops;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(categories::index))
        .route("/api/products", get(products::index))
        .route("/api/products/{id}", get(products::show))
        .route("/api/shops", get(shops::index))
        .route("/api/cart", get(cart::show).delete(cart::clear))
        .route("/api/cart/items", post(cart::add_item))
        .route(
            "/api/cart/items/{id}",
            axum::routing::put(cart::update_item).delete(cart::remove_item),
        )
        .route("/api/cart/checkout", post(cart::checkout))
        .route("/api/session/close", post(session::close))
        .route("/api/admin/products", post(admin::create_product))
        .route(
            "/api/admin/products/{id}",
            axum::routing::put(admin::update_product).delete(admin::delete_product),
        )
        .route("/api/admin/shops", post(admin::create_shop))
        .route(
            "/api/admin/shops/{id}",
            axum::routing::put(admin::update_shop).delete(admin::delete_shop),
        )
}
