//! Embedded static catalog snapshot.
//!
//! Served whenever the remote backend is unreachable or unconfigured. The
//! snapshot is fixed at build time and read-only; it carries categories,
//! subcategories, and products, but no shops, so shop-scoped features are
//! unavailable in fallback mode. Timestamps are a synthetic constant since
//! no backend ever assigned real ones.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use nui_market_core::{Category, CategoryId, Product, ProductId, Subcategory, SubcategoryId};

/// The synthetic timestamp carried by every snapshot entity.
pub const SNAPSHOT_TIMESTAMP: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// Snapshot categories, in display order.
#[must_use]
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

/// Snapshot subcategories, in display order.
#[must_use]
pub fn subcategories() -> &'static [Subcategory] {
    &SUBCATEGORIES
}

/// Snapshot products.
#[must_use]
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

fn category(id: &str, name: &str, icon: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        icon: icon.to_string(),
        created_at: SNAPSHOT_TIMESTAMP,
    }
}

fn subcategory(id: &str, name: &str, category_id: &str) -> Subcategory {
    Subcategory {
        id: SubcategoryId::new(id),
        name: name.to_string(),
        category_id: CategoryId::new(category_id),
        created_at: SNAPSHOT_TIMESTAMP,
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    price_cents: i64,
    category_id: &str,
    subcategory_id: &str,
    description: &str,
    image_url: &str,
    in_stock: bool,
    stock_quantity: u32,
    tags: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Decimal::new(price_cents, 2),
        category_id: CategoryId::new(category_id),
        subcategory_id: Some(SubcategoryId::new(subcategory_id)),
        shop_id: None,
        description: description.to_string(),
        image_url: image_url.to_string(),
        in_stock,
        stock_quantity,
        tags: tags.iter().map(|&t| t.to_string()).collect(),
        created_at: SNAPSHOT_TIMESTAMP,
        updated_at: SNAPSHOT_TIMESTAMP,
    }
}

static CATEGORIES: LazyLock<Vec<Category>> = LazyLock::new(|| {
    vec![
        category("tools", "Tools", "wrench"),
        category("food", "Food", "apple"),
        category("electronics", "Electronics", "smartphone"),
    ]
});

static SUBCATEGORIES: LazyLock<Vec<Subcategory>> = LazyLock::new(|| {
    vec![
        subcategory("hand-tools", "Hand Tools", "tools"),
        subcategory("power-tools", "Power Tools", "tools"),
        subcategory("automotive-tools", "Automotive Tools", "tools"),
        subcategory("construction-tools", "Construction Tools", "tools"),
        subcategory("beverages", "Beverages", "food"),
        subcategory("snacks", "Snacks", "food"),
        subcategory("fresh-produce", "Fresh Produce", "food"),
        subcategory("canned-goods", "Canned Goods", "food"),
        subcategory("dairy", "Dairy", "food"),
        subcategory("smartphones", "Smartphones", "electronics"),
        subcategory("computers", "Computers", "electronics"),
        subcategory("gaming", "Gaming", "electronics"),
        subcategory("audio-equipment", "Audio Equipment", "electronics"),
        subcategory("smart-home", "Smart Home", "electronics"),
    ]
});

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    const TOOLS_IMG: &str =
        "https://images.pexels.com/photos/162553/keys-workshop-mechanic-tools-162553.jpeg";
    const DRINKS_IMG: &str = "https://images.pexels.com/photos/544961/pexels-photo-544961.jpeg";
    const SNACKS_IMG: &str =
        "https://images.pexels.com/photos/1153369/pexels-photo-1153369.jpeg";
    const PHONES_IMG: &str = "https://images.pexels.com/photos/404280/pexels-photo-404280.jpeg";
    const GAMING_IMG: &str =
        "https://images.pexels.com/photos/3945683/pexels-photo-3945683.jpeg";

    vec![
        product(
            "ht001",
            "Professional Hammer Set",
            8999,
            "tools",
            "hand-tools",
            "Complete set of professional hammers for various tasks",
            TOOLS_IMG,
            true,
            25,
            &["hammer", "professional", "construction"],
        ),
        product(
            "ht002",
            "Screwdriver Kit (24-piece)",
            3499,
            "tools",
            "hand-tools",
            "Complete screwdriver set with magnetic tips",
            TOOLS_IMG,
            true,
            40,
            &["screwdriver", "kit", "magnetic"],
        ),
        product(
            "pt001",
            "Cordless Drill Pro",
            19999,
            "tools",
            "power-tools",
            "High-performance cordless drill with 2 batteries",
            TOOLS_IMG,
            true,
            12,
            &["drill", "cordless", "professional"],
        ),
        product(
            "pt002",
            "Electric Circular Saw",
            15999,
            "tools",
            "power-tools",
            "Precision circular saw for wood cutting",
            TOOLS_IMG,
            false,
            0,
            &["saw", "electric", "cutting"],
        ),
        product(
            "bv001",
            "Energy Drink Pack (12)",
            2499,
            "food",
            "beverages",
            "Premium energy drinks for sustained energy",
            DRINKS_IMG,
            true,
            120,
            &["energy", "drinks", "pack"],
        ),
        product(
            "bv002",
            "Craft Beer Selection",
            1899,
            "food",
            "beverages",
            "Local craft beer variety pack",
            DRINKS_IMG,
            true,
            60,
            &["beer", "craft", "local"],
        ),
        product(
            "sn001",
            "Premium Nut Mix",
            1299,
            "food",
            "snacks",
            "Gourmet mixed nuts and dried fruits",
            SNACKS_IMG,
            true,
            80,
            &["nuts", "healthy", "premium"],
        ),
        product(
            "sn002",
            "Artisan Chocolate Bar",
            899,
            "food",
            "snacks",
            "Handcrafted dark chocolate with sea salt",
            SNACKS_IMG,
            true,
            95,
            &["chocolate", "artisan", "dark"],
        ),
        product(
            "sp001",
            "Latest Smartphone Pro",
            89999,
            "electronics",
            "smartphones",
            "Latest flagship smartphone with advanced camera",
            PHONES_IMG,
            true,
            8,
            &["smartphone", "flagship", "camera"],
        ),
        product(
            "sp002",
            "Budget Phone Plus",
            29999,
            "electronics",
            "smartphones",
            "Affordable smartphone with great battery life",
            PHONES_IMG,
            true,
            18,
            &["budget", "battery", "affordable"],
        ),
        product(
            "gm001",
            "Gaming Headset Pro",
            12999,
            "electronics",
            "gaming",
            "Professional gaming headset with surround sound",
            GAMING_IMG,
            true,
            30,
            &["headset", "gaming", "surround"],
        ),
        product(
            "gm002",
            "Mechanical Keyboard RGB",
            18999,
            "electronics",
            "gaming",
            "RGB mechanical keyboard for gaming",
            GAMING_IMG,
            true,
            22,
            &["keyboard", "mechanical", "rgb"],
        ),
    ]
});
