//! Catalog read operations with transparent degradation.
//!
//! Every read consults the injected backend client; when the backend is
//! unconfigured the static snapshot is served directly, and when a remote
//! query fails the resolver logs and degrades to the snapshot rather than
//! propagating the error. The storefront must stay browsable even if the
//! backend is flaky. The same filter is applied to the snapshot that would
//! have been applied remotely, so degraded results stay consistent with the
//! request.
//!
//! Shops are the exception: the snapshot carries none, so shop reads are
//! remote-only and fail with [`CatalogError::BackendUnavailable`] in
//! fallback mode.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

use nui_market_core::{
    Category, CategoryId, CategoryTree, Product, ProductId, Shop, Subcategory, SubcategoryId,
    SubcategoryWithCount, UserId,
};

use crate::catalog::CatalogError;
use crate::catalog::remote::SupabaseClient;
use crate::catalog::static_data;

/// Optional predicates for product listings. Each field narrows the result
/// independently; the default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub search_term: Option<String>,
    #[serde(default)]
    pub in_stock_only: bool,
}

/// Read surface over the catalog.
///
/// Constructed with `Some` client when the backend configuration was present
/// at startup, `None` otherwise; the choice never changes within a session.
#[derive(Clone)]
pub struct CatalogResolver {
    remote: Option<SupabaseClient>,
}

impl CatalogResolver {
    #[must_use]
    pub const fn new(remote: Option<SupabaseClient>) -> Self {
        Self { remote }
    }

    /// Whether reads are served by the live backend this session.
    #[must_use]
    pub const fn backend_available(&self) -> bool {
        self.remote.is_some()
    }

    /// List categories with their subcategories and derived product counts,
    /// ordered by name.
    pub async fn list_categories(&self) -> Vec<CategoryTree> {
        let Some(remote) = &self.remote else {
            return static_category_trees();
        };

        match remote_category_trees(remote).await {
            Ok(trees) => trees,
            Err(error) => {
                warn!(%error, "category query failed, serving static snapshot");
                static_category_trees()
            }
        }
    }

    /// List products matching the filter, ordered by name ascending.
    pub async fn list_products(&self, filter: Option<&ProductFilter>) -> Vec<Product> {
        let Some(remote) = &self.remote else {
            return filter_static_products(filter);
        };

        match remote.list_products(filter).await {
            Ok(products) => products,
            Err(error) => {
                warn!(%error, "product query failed, serving static snapshot");
                filter_static_products(filter)
            }
        }
    }

    /// Fetch a single product. Absence is a valid result, not an error.
    pub async fn get_product(&self, id: &ProductId) -> Option<Product> {
        let Some(remote) = &self.remote else {
            return static_product(id);
        };

        match remote.get_product(id).await {
            Ok(product) => product,
            Err(error) => {
                warn!(%error, %id, "product lookup failed, serving static snapshot");
                static_product(id)
            }
        }
    }

    /// List all shops, ordered by name. Remote-only: there is no static
    /// shop data to degrade to.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BackendUnavailable`] in fallback mode, or the
    /// remote error unchanged.
    pub async fn list_shops(&self) -> Result<Vec<Shop>, CatalogError> {
        let remote = self.remote.as_ref().ok_or(CatalogError::BackendUnavailable)?;
        remote.list_shops().await
    }

    /// List the shops owned by a user, ordered by name. Remote-only.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::BackendUnavailable`] in fallback mode, or the
    /// remote error unchanged.
    pub async fn list_shops_by_owner(&self, owner: &UserId) -> Result<Vec<Shop>, CatalogError> {
        let remote = self.remote.as_ref().ok_or(CatalogError::BackendUnavailable)?;
        remote.list_shops_by_owner(owner).await
    }
}

// =============================================================================
// Category Assembly
// =============================================================================

async fn remote_category_trees(remote: &SupabaseClient) -> Result<Vec<CategoryTree>, CatalogError> {
    let categories = remote.list_categories().await?;
    let subcategories = remote.list_subcategories().await?;
    let refs = remote.list_product_refs().await?;

    let counts = subcategory_counts(refs.iter().map(|r| r.subcategory_id.as_ref()));
    Ok(assemble_trees(categories, &subcategories, &counts))
}

fn static_category_trees() -> Vec<CategoryTree> {
    let counts = subcategory_counts(
        static_data::products()
            .iter()
            .map(|p| p.subcategory_id.as_ref()),
    );
    assemble_trees(
        static_data::categories().to_vec(),
        static_data::subcategories(),
        &counts,
    )
}

/// The single authoritative count computation: products per subcategory in
/// the product set the listing was resolved against. Applied uniformly to
/// the remote and static paths.
fn subcategory_counts<'a>(
    assignments: impl Iterator<Item = Option<&'a SubcategoryId>>,
) -> HashMap<SubcategoryId, usize> {
    let mut counts = HashMap::new();
    for subcategory_id in assignments.flatten() {
        *counts.entry(subcategory_id.clone()).or_insert(0) += 1;
    }
    counts
}

/// Join subcategories (with counts) under their owning categories. Both
/// levels are sorted by name for a deterministic, source-independent order.
fn assemble_trees(
    mut categories: Vec<Category>,
    subcategories: &[Subcategory],
    counts: &HashMap<SubcategoryId, usize>,
) -> Vec<CategoryTree> {
    categories.sort_by(|a, b| name_key(&a.name).cmp(&name_key(&b.name)));

    categories
        .into_iter()
        .map(|category| {
            let mut children: Vec<SubcategoryWithCount> = subcategories
                .iter()
                .filter(|s| s.category_id == category.id)
                .map(|s| SubcategoryWithCount {
                    subcategory: s.clone(),
                    count: counts.get(&s.id).copied().unwrap_or(0),
                })
                .collect();
            children.sort_by(|a, b| {
                name_key(&a.subcategory.name).cmp(&name_key(&b.subcategory.name))
            });

            CategoryTree {
                category,
                subcategories: children,
            }
        })
        .collect()
}

// =============================================================================
// Static Product Reads
// =============================================================================

fn static_product(id: &ProductId) -> Option<Product> {
    static_data::products().iter().find(|p| &p.id == id).cloned()
}

/// Apply the same predicate semantics the remote query would have applied:
/// equality on category/subcategory/in-stock, case-insensitive substring on
/// name or description.
fn filter_static_products(filter: Option<&ProductFilter>) -> Vec<Product> {
    let mut products: Vec<Product> = static_data::products()
        .iter()
        .filter(|p| filter.is_none_or(|f| matches_filter(p, f)))
        .cloned()
        .collect();
    products.sort_by(|a, b| name_key(&a.name).cmp(&name_key(&b.name)));
    products
}

fn matches_filter(product: &Product, filter: &ProductFilter) -> bool {
    if let Some(category_id) = &filter.category_id
        && &product.category_id != category_id
    {
        return false;
    }
    if let Some(subcategory_id) = &filter.subcategory_id
        && product.subcategory_id.as_ref() != Some(subcategory_id)
    {
        return false;
    }
    if filter.in_stock_only && !product.in_stock {
        return false;
    }
    if let Some(term) = filter.search_term.as_deref()
        && !term.is_empty()
    {
        let term = term.to_lowercase();
        return product.name.to_lowercase().contains(&term)
            || product.description.to_lowercase().contains(&term);
    }
    true
}

fn name_key(name: &str) -> String {
    name.to_lowercase()
}
