//! Domain types for the storefront catalog.
//!
//! These types mirror the row shapes of the remote backend's four
//! collections (categories, subcategories, shops, products) and the derived
//! read shapes the resolver assembles from them. The remote backend or the
//! embedded static dataset is the owning source of truth; nothing here is
//! persisted locally.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{CategoryId, ProductId, ShopId, SubcategoryId, UserId};

// =============================================================================
// Categories
// =============================================================================

/// A top-level catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Symbolic icon key, resolved to a UI glyph by the overlay.
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// A subcategory under a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    /// Owning category; must reference an existing [`Category`].
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
}

/// A subcategory together with its derived product count.
///
/// The count is never stored; it is computed at resolution time from the
/// product set the subcategory was resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryWithCount {
    #[serde(flatten)]
    pub subcategory: Subcategory,
    pub count: usize,
}

/// A category with its resolved subcategories, the shape returned by
/// catalog category listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<SubcategoryWithCount>,
}

// =============================================================================
// Products
// =============================================================================

/// A purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Non-negative decimal price.
    pub price: Decimal,
    /// Owning category; required.
    pub category_id: CategoryId,
    /// Optional subcategory; when present it belongs to `category_id`.
    pub subcategory_id: Option<SubcategoryId>,
    /// Owning shop; `None` means global/unassigned.
    pub shop_id: Option<ShopId>,
    pub description: String,
    pub image_url: String,
    /// Availability flag shown in the overlay.
    pub in_stock: bool,
    pub stock_quantity: u32,
    /// Free-text tags; order is not significant.
    pub tags: Vec<String>,
    /// Assigned by the remote backend; synthetic constant in the static
    /// dataset.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product. The backend assigns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<ShopId>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

const fn default_in_stock() -> bool {
    true
}

/// Partial update for a product. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<SubcategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<ShopId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProductPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.subcategory_id.is_none()
            && self.shop_id.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.in_stock.is_none()
            && self.stock_quantity.is_none()
            && self.tags.is_none()
    }
}

// =============================================================================
// Shops
// =============================================================================

/// A player-run shop. Shops exist only on the remote backend; the static
/// dataset carries none, so shop-scoped features are unavailable in fallback
/// mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub description: String,
    pub location: String,
    pub opening_hours: String,
    /// Owning user identity from the external auth collaborator.
    pub owner_id: Option<UserId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShop {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub opening_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

const fn default_is_active() -> bool {
    true
}

/// Partial update for a shop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ShopPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.opening_hours.is_none()
            && self.owner_id.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new("ht001"),
            name: "Professional Hammer Set".to_string(),
            price: Decimal::new(8999, 2),
            category_id: CategoryId::new("tools"),
            subcategory_id: Some(SubcategoryId::new("hand-tools")),
            shop_id: None,
            description: "Complete set of professional hammers".to_string(),
            image_url: "https://img.example/hammers.jpg".to_string(),
            in_stock: true,
            stock_quantity: 25,
            tags: vec!["hammer".to_string(), "professional".to_string()],
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_product_serde_roundtrip() {
        let product = sample_product();
        let json = serde_json::to_string(&product).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_product_deserializes_backend_row() {
        // The remote backend sends prices as JSON numbers and timestamps as
        // RFC 3339 strings.
        let row = serde_json::json!({
            "id": "5f3a1e9c-0000-0000-0000-000000000001",
            "name": "Energy Drink Pack",
            "price": 24.99,
            "category_id": "food",
            "subcategory_id": "beverages",
            "shop_id": null,
            "description": "Premium energy drinks",
            "image_url": "https://img.example/drinks.jpg",
            "in_stock": true,
            "stock_quantity": 120,
            "tags": ["energy", "drinks"],
            "created_at": "2025-03-01T12:00:00+00:00",
            "updated_at": "2025-03-02T08:30:00+00:00"
        });

        let product: Product = serde_json::from_value(row).unwrap();
        assert_eq!(product.price, Decimal::new(2499, 2));
        assert!(product.subcategory_id.is_some());
        assert!(product.shop_id.is_none());
    }

    #[test]
    fn test_category_tree_flattens_category_fields() {
        let tree = CategoryTree {
            category: Category {
                id: CategoryId::new("tools"),
                name: "Tools".to_string(),
                icon: "wrench".to_string(),
                created_at: DateTime::UNIX_EPOCH,
            },
            subcategories: vec![SubcategoryWithCount {
                subcategory: Subcategory {
                    id: SubcategoryId::new("hand-tools"),
                    name: "Hand Tools".to_string(),
                    category_id: CategoryId::new("tools"),
                    created_at: DateTime::UNIX_EPOCH,
                },
                count: 2,
            }],
        };

        let value = serde_json::to_value(&tree).unwrap();
        // Flattened: id/name/icon sit next to subcategories.
        assert_eq!(value["id"], "tools");
        assert_eq!(value["icon"], "wrench");
        assert_eq!(value["subcategories"][0]["count"], 2);
        assert_eq!(value["subcategories"][0]["id"], "hand-tools");
    }

    #[test]
    fn test_product_patch_skips_absent_fields() {
        let patch = ProductPatch {
            price: Some(Decimal::new(1999, 2)),
            in_stock: Some(false),
            ..ProductPatch::default()
        };

        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("price"));
        assert!(object.contains_key("in_stock"));
    }

    #[test]
    fn test_product_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            name: Some("x".to_string()),
            ..ProductPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_new_product_defaults() {
        let input: NewProduct = serde_json::from_value(serde_json::json!({
            "name": "Crowbar",
            "price": 12.5,
            "category_id": "tools"
        }))
        .unwrap();

        assert!(input.in_stock);
        assert_eq!(input.stock_quantity, 0);
        assert!(input.tags.is_empty());
        assert!(input.subcategory_id.is_none());
    }
}
