//! Pure filter and sort pipeline applied to resolved products.
//!
//! Stages run in a fixed order: category equality, subcategory equality,
//! case-folded substring search over name/description/tags, then a stable
//! sort by the requested key. No I/O, no side effects; identical inputs
//! always produce an identical output sequence.
//!
//! Note the search here is wider than the resolver's filter: the pipeline
//! also matches tags, while the resolver mirrors the remote predicate
//! (name/description only).

use serde::Deserialize;

use nui_market_core::{CategoryId, Product, SubcategoryId};

/// Sort order for the pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortKey {
    /// Lexicographic by name, case-folded, ascending.
    #[default]
    #[serde(rename = "name")]
    Name,
    /// Numeric price, ascending.
    #[serde(rename = "price-low")]
    PriceLow,
    /// Numeric price, descending.
    #[serde(rename = "price-high")]
    PriceHigh,
}

impl SortKey {
    /// Parse a sort key; unknown or absent keys fall back to [`Self::Name`].
    #[must_use]
    pub fn parse(key: Option<&str>) -> Self {
        match key {
            Some("price-low") => Self::PriceLow,
            Some("price-high") => Self::PriceHigh,
            _ => Self::Name,
        }
    }
}

/// Parameters for one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineParams {
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub search_term: Option<String>,
    pub sort_key: SortKey,
}

/// Run the pipeline over a product collection.
#[must_use]
pub fn resolve(products: &[Product], params: &PipelineParams) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|product| {
            params
                .category_id
                .as_ref()
                .is_none_or(|id| &product.category_id == id)
        })
        .filter(|product| {
            params
                .subcategory_id
                .as_ref()
                .is_none_or(|id| product.subcategory_id.as_ref() == Some(id))
        })
        .filter(|product| matches_search(product, params.search_term.as_deref()))
        .cloned()
        .collect();

    sort_products(&mut filtered, params.sort_key);
    filtered
}

/// Case-folded substring match over name, description, or any tag. An empty
/// or absent term matches everything.
fn matches_search(product: &Product, term: Option<&str>) -> bool {
    let Some(term) = term.filter(|t| !t.is_empty()) else {
        return true;
    };
    let term = term.to_lowercase();

    product.name.to_lowercase().contains(&term)
        || product.description.to_lowercase().contains(&term)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&term))
}

/// Stable sort: products with equal keys keep their input order.
fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Name => products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortKey::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use nui_market_core::ProductId;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, price_cents: i64, category: &str, tags: &[&str]) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::new(price_cents, 2),
            category_id: CategoryId::new(category),
            subcategory_id: None,
            shop_id: None,
            description: format!("{name} description"),
            image_url: String::new(),
            in_stock: true,
            stock_quantity: 10,
            tags: tags.iter().map(|&t| t.to_string()).collect(),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    fn weapons_fixture() -> Vec<Product> {
        vec![
            product("w1", "Combat Pistol", 85_000, "1", &["sidearm"]),
            product("w2", "Pump Shotgun", 120_000, "2", &["shotgun"]),
            product("w3", "Carbine Rifle", 250_000, "1", &["rifle"]),
        ]
    }

    #[test]
    fn test_no_params_sorts_by_name() {
        let products = weapons_fixture();
        let result = resolve(&products, &PipelineParams::default());

        let ids: Vec<_> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["w3", "w1", "w2"]);
    }

    #[test]
    fn test_category_filter_keeps_matching_products_only() {
        let products = weapons_fixture();
        let params = PipelineParams {
            category_id: Some(CategoryId::new("1")),
            ..PipelineParams::default()
        };

        let result = resolve(&products, &params);
        assert!(result.iter().all(|p| p.category_id == CategoryId::new("1")));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_subcategory_filter_matches_without_category_filter() {
        let mut products = weapons_fixture();
        if let Some(first) = products.first_mut() {
            first.subcategory_id = Some(SubcategoryId::new("pistols"));
        }

        let params = PipelineParams {
            subcategory_id: Some(SubcategoryId::new("pistols")),
            ..PipelineParams::default()
        };

        let result = resolve(&products, &params);
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().unwrap().id, ProductId::new("w1"));
    }

    #[test]
    fn test_search_matches_tags() {
        let products = weapons_fixture();
        let params = PipelineParams {
            search_term: Some("RIFLE".to_string()),
            ..PipelineParams::default()
        };

        let result = resolve(&products, &params);
        // "rifle" is w3's tag and part of its name; w2's tag "shotgun" does
        // not match.
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().unwrap().id, ProductId::new("w3"));
    }

    #[test]
    fn test_price_high_orders_dearest_first() {
        let products = weapons_fixture();
        let params = PipelineParams {
            sort_key: SortKey::PriceHigh,
            ..PipelineParams::default()
        };

        let result = resolve(&products, &params);
        let ids: Vec<_> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["w3", "w2", "w1"]);
    }

    #[test]
    fn test_price_high_on_two_product_category() {
        // Two products in category 1 at 850.00 and 2500.00: dearer first.
        let products = weapons_fixture();
        let params = PipelineParams {
            category_id: Some(CategoryId::new("1")),
            sort_key: SortKey::PriceHigh,
            ..PipelineParams::default()
        };

        let result = resolve(&products, &params);
        let ids: Vec<_> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["w3", "w1"]);
    }

    #[test]
    fn test_price_low_orders_cheapest_first() {
        let products = weapons_fixture();
        let params = PipelineParams {
            sort_key: SortKey::PriceLow,
            ..PipelineParams::default()
        };

        let result = resolve(&products, &params);
        let ids: Vec<_> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "w2", "w3"]);
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let products = weapons_fixture();
        let params = PipelineParams {
            category_id: Some(CategoryId::new("1")),
            search_term: Some("pistol".to_string()),
            ..PipelineParams::default()
        };

        let result = resolve(&products, &params);
        for item in &result {
            assert!(products.iter().any(|p| p.id == item.id));
        }
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let products = weapons_fixture();
        let params = PipelineParams {
            category_id: Some(CategoryId::new("1")),
            search_term: Some("combat".to_string()),
            sort_key: SortKey::PriceHigh,
            ..PipelineParams::default()
        };

        let once = resolve(&products, &params);
        let twice = resolve(&once, &params);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let products = vec![
            product("a", "Ammo Box", 5_000, "1", &[]),
            product("b", "Ammo Box", 5_000, "1", &[]),
            product("c", "Ammo Box", 5_000, "1", &[]),
        ];

        let result = resolve(&products, &PipelineParams::default());
        let ids: Vec<_> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_sort_key_defaults_to_name() {
        assert_eq!(SortKey::parse(Some("rating")), SortKey::Name);
        assert_eq!(SortKey::parse(None), SortKey::Name);
        assert_eq!(SortKey::parse(Some("price-low")), SortKey::PriceLow);
        assert_eq!(SortKey::parse(Some("price-high")), SortKey::PriceHigh);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let params = PipelineParams {
            search_term: Some("anything".to_string()),
            ..PipelineParams::default()
        };
        assert!(resolve(&[], &params).is_empty());
    }
}
