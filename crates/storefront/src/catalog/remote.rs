//! Remote backend client implementation.
//!
//! Speaks PostgREST over `reqwest` to the four backend collections
//! (categories, subcategories, shops, products). Every operation maps
//! transport and status failures into [`CatalogError`]; callers decide
//! whether to recover (reads) or propagate (writes).

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use nui_market_core::{
    Category, NewProduct, NewShop, Product, ProductId, ProductPatch, Shop, ShopId, ShopPatch,
    Subcategory, SubcategoryId, UserId,
};

use crate::catalog::CatalogError;
use crate::catalog::resolver::ProductFilter;
use crate::config::SupabaseConfig;

/// Client for the remote catalog backend.
///
/// Cheaply cloneable; all operations are independent, side-effect-free
/// requests with no shared mutable state.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a new backend client from configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(SupabaseClientInner {
                client: reqwest::Client::new(),
                base_url: format!("{}/rest/v1", config.url),
                anon_key: config.anon_key.expose_secret().to_string(),
            }),
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, format!("{}/{table}", self.inner.base_url))
            .header("apikey", &self.inner.anon_key)
            .header(
                "Authorization",
                format!("Bearer {}", self.inner.anon_key),
            )
    }

    /// Read the response body and decode a row set, mapping non-success
    /// statuses into [`CatalogError`].
    async fn read_rows<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, CatalogError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(String, String)],
    ) -> Result<Vec<T>, CatalogError> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(query)
            .send()
            .await?;
        Self::read_rows(response).await
    }

    /// Insert a row and return the persisted representation.
    async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = Self::read_rows(response).await?;
        rows.into_iter().next().ok_or_else(|| CatalogError::Query {
            status: 200,
            message: format!("insert into {table} returned no representation"),
        })
    }

    /// Update a row by id and return the persisted representation.
    async fn update<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: &str,
        body: &B,
    ) -> Result<T, CatalogError> {
        let response = self
            .request(reqwest::Method::PATCH, table)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{id}"))])
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = Self::read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| CatalogError::NotFound(format!("{table} row {id}")))
    }

    /// Delete a row by id.
    async fn delete(&self, table: &str, id: &str) -> Result<(), CatalogError> {
        let response = self
            .request(reqwest::Method::DELETE, table)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(status_error(status.as_u16(), body));
        }
        Ok(())
    }

    // =========================================================================
    // Category Reads
    // =========================================================================

    /// Fetch all categories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decode fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.select(
            "categories",
            &[select_all(), order_by_name()],
        )
        .await
    }

    /// Fetch all subcategories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decode fails.
    #[instrument(skip(self))]
    pub async fn list_subcategories(&self) -> Result<Vec<Subcategory>, CatalogError> {
        self.select(
            "subcategories",
            &[select_all(), order_by_name()],
        )
        .await
    }

    /// Fetch the subcategory assignment of every product. Used to derive
    /// per-subcategory counts without pulling full rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decode fails.
    #[instrument(skip(self))]
    pub async fn list_product_refs(&self) -> Result<Vec<ProductRef>, CatalogError> {
        self.select(
            "products",
            &[("select".to_string(), "id,subcategory_id".to_string())],
        )
        .await
    }

    // =========================================================================
    // Product Reads
    // =========================================================================

    /// Fetch products matching the filter, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decode fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: Option<&ProductFilter>,
    ) -> Result<Vec<Product>, CatalogError> {
        self.select("products", &product_query(filter)).await
    }

    /// Fetch a single product by id. Absence is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decode fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let rows: Vec<Product> = self
            .select(
                "products",
                &[select_all(), ("id".to_string(), format!("eq.{id}"))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    // =========================================================================
    // Shop Reads
    // =========================================================================

    /// Fetch all shops, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decode fails.
    #[instrument(skip(self))]
    pub async fn list_shops(&self) -> Result<Vec<Shop>, CatalogError> {
        self.select("shops", &[select_all(), order_by_name()]).await
    }

    /// Fetch the shops owned by a user, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decode fails.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn list_shops_by_owner(&self, owner: &UserId) -> Result<Vec<Shop>, CatalogError> {
        self.select(
            "shops",
            &[
                select_all(),
                ("owner_id".to_string(), format!("eq.{owner}")),
                order_by_name(),
            ],
        )
        .await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a product and return the persisted row.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn insert_product(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        self.insert("products", product).await
    }

    /// Apply a partial update to a product and return the persisted row.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write, or
    /// [`CatalogError::NotFound`] if no such product exists.
    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, CatalogError> {
        self.update("products", id.as_str(), patch).await
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogError> {
        self.delete("products", id.as_str()).await
    }

    /// Insert a shop and return the persisted row.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write.
    #[instrument(skip(self, shop), fields(name = %shop.name))]
    pub async fn insert_shop(&self, shop: &NewShop) -> Result<Shop, CatalogError> {
        self.insert("shops", shop).await
    }

    /// Apply a partial update to a shop and return the persisted row.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write, or
    /// [`CatalogError::NotFound`] if no such shop exists.
    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn update_shop(&self, id: &ShopId, patch: &ShopPatch) -> Result<Shop, CatalogError> {
        self.update("shops", id.as_str(), patch).await
    }

    /// Delete a shop by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects or fails the write.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_shop(&self, id: &ShopId) -> Result<(), CatalogError> {
        self.delete("shops", id.as_str()).await
    }
}

/// Subcategory assignment of a product, for count derivation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    pub subcategory_id: Option<SubcategoryId>,
}

// =============================================================================
// Query Building
// =============================================================================

fn select_all() -> (String, String) {
    ("select".to_string(), "*".to_string())
}

fn order_by_name() -> (String, String) {
    ("order".to_string(), "name.asc".to_string())
}

/// Translate a [`ProductFilter`] into PostgREST query parameters: equality
/// predicates plus a case-insensitive substring-or over name/description.
fn product_query(filter: Option<&ProductFilter>) -> Vec<(String, String)> {
    let mut query = vec![select_all(), order_by_name()];

    let Some(filter) = filter else {
        return query;
    };

    if let Some(category_id) = &filter.category_id {
        query.push(("category_id".to_string(), format!("eq.{category_id}")));
    }
    if let Some(subcategory_id) = &filter.subcategory_id {
        query.push((
            "subcategory_id".to_string(),
            format!("eq.{subcategory_id}"),
        ));
    }
    if filter.in_stock_only {
        query.push(("in_stock".to_string(), "eq.true".to_string()));
    }
    if let Some(term) = filter
        .search_term
        .as_deref()
        .map(sanitize_search_term)
        .filter(|t| !t.is_empty())
    {
        query.push((
            "or".to_string(),
            format!("(name.ilike.*{term}*,description.ilike.*{term}*)"),
        ));
    }

    query
}

/// Strip characters that are part of the PostgREST logic-tree syntax so a
/// search term cannot terminate the `or=(...)` expression early.
fn sanitize_search_term(term: &str) -> String {
    term.chars().filter(|c| !matches!(c, ',' | '(' | ')' | '"')).collect()
}

/// Map a non-success status into the error taxonomy: client-side rejects are
/// validation failures, everything else is a failed query.
fn status_error(status: u16, body: String) -> CatalogError {
    let message = body.chars().take(500).collect::<String>();
    match status {
        400 | 409 | 422 => CatalogError::Validation(message),
        _ => CatalogError::Query { status, message },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nui_market_core::CategoryId;

    fn pairs(query: &[(String, String)]) -> Vec<(&str, &str)> {
        query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_product_query_without_filter() {
        let query = product_query(None);
        assert_eq!(pairs(&query), vec![("select", "*"), ("order", "name.asc")]);
    }

    #[test]
    fn test_product_query_equality_filters() {
        let filter = ProductFilter {
            category_id: Some(CategoryId::new("tools")),
            subcategory_id: Some(SubcategoryId::new("hand-tools")),
            in_stock_only: true,
            ..ProductFilter::default()
        };

        let query = product_query(Some(&filter));
        assert!(query.contains(&("category_id".to_string(), "eq.tools".to_string())));
        assert!(query.contains(&("subcategory_id".to_string(), "eq.hand-tools".to_string())));
        assert!(query.contains(&("in_stock".to_string(), "eq.true".to_string())));
    }

    #[test]
    fn test_product_query_in_stock_omitted_when_false() {
        let filter = ProductFilter::default();
        let query = product_query(Some(&filter));
        assert!(!query.iter().any(|(k, _)| k == "in_stock"));
    }

    #[test]
    fn test_product_query_search_is_substring_or() {
        let filter = ProductFilter {
            search_term: Some("drill".to_string()),
            ..ProductFilter::default()
        };

        let query = product_query(Some(&filter));
        assert!(query.contains(&(
            "or".to_string(),
            "(name.ilike.*drill*,description.ilike.*drill*)".to_string()
        )));
    }

    #[test]
    fn test_search_term_cannot_break_out_of_or_tree() {
        let filter = ProductFilter {
            search_term: Some("a),id.eq.(b".to_string()),
            ..ProductFilter::default()
        };

        let query = product_query(Some(&filter));
        let or = query.iter().find(|(k, _)| k == "or").unwrap();
        assert_eq!(or.1, "(name.ilike.*aid.eq.b*,description.ilike.*aid.eq.b*)");
    }

    #[test]
    fn test_blank_search_term_adds_no_predicate() {
        let filter = ProductFilter {
            search_term: Some("(),".to_string()),
            ..ProductFilter::default()
        };

        let query = product_query(Some(&filter));
        assert!(!query.iter().any(|(k, _)| k == "or"));
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(400, "bad".to_string()),
            CatalogError::Validation(_)
        ));
        assert!(matches!(
            status_error(422, "bad".to_string()),
            CatalogError::Validation(_)
        ));
        assert!(matches!(
            status_error(500, "boom".to_string()),
            CatalogError::Query { status: 500, .. }
        ));
    }
}
