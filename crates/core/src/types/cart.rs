//! Cart line type shared between the cart session and the host channel.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::catalog::Product;

/// A product snapshot plus an accumulated quantity.
///
/// Invariants, enforced by the cart session: quantity is always >= 1 (a
/// mutation that would reach 0 removes the line instead), and a cart holds at
/// most one line per product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price of the line: product price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::{CategoryId, ProductId};
    use chrono::DateTime;

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product: Product {
                id: ProductId::new("bv001"),
                name: "Energy Drink Pack".to_string(),
                price: Decimal::new(2499, 2),
                category_id: CategoryId::new("food"),
                subcategory_id: None,
                shop_id: None,
                description: String::new(),
                image_url: String::new(),
                in_stock: true,
                stock_quantity: 10,
                tags: Vec::new(),
                created_at: DateTime::UNIX_EPOCH,
                updated_at: DateTime::UNIX_EPOCH,
            },
            quantity: 3,
        };

        assert_eq!(line.line_total(), Decimal::new(7497, 2));
    }
}
