//! Product route handlers.
//!
//! The listing resolves products on demand (not per UI event) and then runs
//! the pure filter/sort pipeline over the resolved collection. Availability
//! narrowing happens at the resolver (it is not a pipeline stage); category,
//! subcategory, search, and ordering are the pipeline's job so that tag
//! matching and stable sorting behave identically in live and fallback mode.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use nui_market_core::{CategoryId, Product, ProductId, SubcategoryId};

use crate::catalog::pipeline::{self, PipelineParams, SortKey};
use crate::catalog::resolver::ProductFilter;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub search: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    pub sort: Option<String>,
}

/// List products after applying the filter/sort pipeline.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<Vec<Product>> {
    let filter = ProductFilter {
        in_stock_only: query.in_stock,
        ..ProductFilter::default()
    };
    let products = state.resolver().list_products(Some(&filter)).await;

    let params = PipelineParams {
        category_id: query.category_id,
        subcategory_id: query.subcategory_id,
        search_term: query.search,
        sort_key: SortKey::parse(query.sort.as_deref()),
    };
    Json(pipeline::resolve(&products, &params))
}

/// Fetch a single product by id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .resolver()
        .get_product(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
