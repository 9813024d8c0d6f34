//! Catalog write operations.
//!
//! Writes go to the remote backend only. A write against a read-only static
//! snapshot has no meaningful effect, so when the backend is unavailable
//! every operation fails fast with [`CatalogError::BackendUnavailable`], and
//! remote errors propagate unchanged: the administrative UI must surface
//! them to a human operator, never mask them.

use nui_market_core::{
    NewProduct, NewShop, Product, ProductId, ProductPatch, Shop, ShopId, ShopPatch,
};

use crate::catalog::CatalogError;
use crate::catalog::remote::SupabaseClient;

/// Write surface over the catalog. Shares the entity schema with the
/// resolver's read shape.
#[derive(Clone)]
pub struct CatalogMutator {
    remote: Option<SupabaseClient>,
}

impl CatalogMutator {
    #[must_use]
    pub const fn new(remote: Option<SupabaseClient>) -> Self {
        Self { remote }
    }

    fn remote(&self) -> Result<&SupabaseClient, CatalogError> {
        self.remote.as_ref().ok_or(CatalogError::BackendUnavailable)
    }

    /// Create a product and return the persisted entity.
    ///
    /// # Errors
    ///
    /// Fails with [`CatalogError::BackendUnavailable`] in fallback mode;
    /// backend rejections (including validation failures) propagate
    /// unchanged.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        self.remote()?.insert_product(product).await
    }

    /// Update a product and return the persisted entity.
    ///
    /// # Errors
    ///
    /// Same policy as [`Self::create_product`]; additionally
    /// [`CatalogError::NotFound`] if no such product exists.
    pub async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Product, CatalogError> {
        self.remote()?.update_product(id, patch).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Same policy as [`Self::create_product`].
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogError> {
        self.remote()?.delete_product(id).await
    }

    /// Create a shop and return the persisted entity.
    ///
    /// # Errors
    ///
    /// Same policy as [`Self::create_product`].
    pub async fn create_shop(&self, shop: &NewShop) -> Result<Shop, CatalogError> {
        self.remote()?.insert_shop(shop).await
    }

    /// Update a shop and return the persisted entity.
    ///
    /// # Errors
    ///
    /// Same policy as [`Self::update_product`].
    pub async fn update_shop(&self, id: &ShopId, patch: &ShopPatch) -> Result<Shop, CatalogError> {
        self.remote()?.update_shop(id, patch).await
    }

    /// Delete a shop.
    ///
    /// # Errors
    ///
    /// Same policy as [`Self::create_product`].
    pub async fn delete_shop(&self, id: &ShopId) -> Result<(), CatalogError> {
        self.remote()?.delete_shop(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nui_market_core::CategoryId;
    use rust_decimal::Decimal;

    fn offline_mutator() -> CatalogMutator {
        CatalogMutator::new(None)
    }

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Crowbar".to_string(),
            price: Decimal::new(1250, 2),
            category_id: CategoryId::new("tools"),
            subcategory_id: None,
            shop_id: None,
            description: String::new(),
            image_url: String::new(),
            in_stock: true,
            stock_quantity: 5,
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_writes_fail_fast_without_backend() {
        let mutator = offline_mutator();

        assert!(matches!(
            mutator.create_product(&new_product()).await,
            Err(CatalogError::BackendUnavailable)
        ));
        assert!(matches!(
            mutator
                .update_product(&ProductId::new("ht001"), &ProductPatch::default())
                .await,
            Err(CatalogError::BackendUnavailable)
        ));
        assert!(matches!(
            mutator.delete_product(&ProductId::new("ht001")).await,
            Err(CatalogError::BackendUnavailable)
        ));
        assert!(matches!(
            mutator
                .create_shop(&NewShop {
                    name: "Benny's".to_string(),
                    description: String::new(),
                    location: String::new(),
                    opening_hours: String::new(),
                    owner_id: None,
                    is_active: true,
                })
                .await,
            Err(CatalogError::BackendUnavailable)
        ));
        assert!(matches!(
            mutator
                .update_shop(&ShopId::new("s1"), &ShopPatch::default())
                .await,
            Err(CatalogError::BackendUnavailable)
        ));
        assert!(matches!(
            mutator.delete_shop(&ShopId::new("s1")).await,
            Err(CatalogError::BackendUnavailable)
        ));
    }
}
