//! Cart session state machine.
//!
//! The session exclusively owns its cart lines for the lifetime of the
//! overlay session; nothing is persisted and the cart is discarded on
//! reload. Every mutation mirrors the full cart state to the host process
//! through the [`HostChannel`], whose delivery is best-effort and can never
//! fail a cart operation.
//!
//! Invariants, restored after every operation: no line with quantity <= 0
//! (a mutation that would reach zero removes the line), at most one line per
//! product identifier, insertion order preserved.

use rust_decimal::Decimal;

use nui_market_core::{CartLine, Product, ProductId};

use crate::nui::{HostChannel, action, payload};

/// In-memory, per-session cart.
pub struct CartSession {
    lines: Vec<CartLine>,
    host: HostChannel,
}

impl CartSession {
    #[must_use]
    pub const fn new(host: HostChannel) -> Self {
        Self {
            lines: Vec::new(),
            host,
        }
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Add one unit of a product: increments the existing line or inserts a
    /// new one with quantity 1. Emits an `addToCart` notification followed
    /// by the full cart mirror.
    pub fn add(&mut self, product: Product) {
        self.host
            .send(action::ADD_TO_CART, payload::product_added(&product, 1));

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product,
                quantity: 1,
            });
        }

        self.mirror();
    }

    /// Replace a line's quantity. Zero is equivalent to [`Self::remove`];
    /// setting a quantity on a line that does not exist leaves the cart
    /// unchanged. The cart mirror is emitted either way.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            line.quantity = quantity;
        }

        self.mirror();
    }

    /// Remove a line if present. Emits the cart mirror, which may represent
    /// an empty cart.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product.id != product_id);
        self.mirror();
    }

    /// Empty the cart and emit an empty mirror.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.mirror();
    }

    /// Sum of all line quantities. Pure query, no emission.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line totals. Pure query, no emission.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Send the cart to the host for checkout. Does not mutate the cart;
    /// the host decides what happens next.
    pub fn checkout(&self) {
        self.host
            .send(action::PROCESS_CHECKOUT, payload::checkout(&self.lines));
    }

    fn mirror(&self) {
        self.host
            .send(action::UPDATE_CART, payload::cart_state(&self.lines));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::nui::{HostTransport, NuiMessage};
    use chrono::DateTime;
    use nui_market_core::CategoryId;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingTransport {
        messages: Mutex<Vec<NuiMessage>>,
    }

    impl RecordingTransport {
        fn actions(&self) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .map(|m| m.action.clone())
                .collect()
        }

        fn last(&self) -> NuiMessage {
            self.messages.lock().unwrap().last().unwrap().clone()
        }
    }

    impl HostTransport for Arc<RecordingTransport> {
        fn deliver(&self, message: NuiMessage) {
            self.messages.lock().unwrap().push(message);
        }
    }

    fn session() -> (CartSession, Arc<RecordingTransport>) {
        let recorder = Arc::new(RecordingTransport::default());
        let cart = CartSession::new(HostChannel::new(Arc::clone(&recorder)));
        (cart, recorder)
    }

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price_cents, 2),
            category_id: CategoryId::new("tools"),
            subcategory_id: None,
            shop_id: None,
            description: String::new(),
            image_url: String::new(),
            in_stock: true,
            stock_quantity: 10,
            tags: Vec::new(),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    fn assert_invariants(cart: &CartSession) {
        let mut seen = std::collections::HashSet::new();
        for line in cart.lines() {
            assert!(line.quantity >= 1);
            assert!(seen.insert(line.product.id.clone()));
        }
    }

    #[test]
    fn test_add_twice_accumulates_one_line() {
        let (mut cart, _recorder) = session();

        cart.add(product("w1", 85_000));
        cart.add(product("w1", 85_000));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert_invariants(&cart);
    }

    #[test]
    fn test_add_emits_notification_then_mirror() {
        let (mut cart, recorder) = session();

        cart.add(product("w1", 85_000));

        assert_eq!(recorder.actions(), vec!["addToCart", "updateCart"]);
        let mirror = recorder.last();
        assert_eq!(mirror.data["count"], 1);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let (mut cart, _recorder) = session();

        cart.add(product("w1", 85_000));
        cart.set_quantity(&ProductId::new("w1"), 5);

        assert_eq!(cart.total_items(), 5);
        assert_invariants(&cart);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let (mut cart_a, _) = session();
        let (mut cart_b, _) = session();

        cart_a.add(product("w1", 85_000));
        cart_b.add(product("w1", 85_000));

        cart_a.set_quantity(&ProductId::new("w1"), 0);
        cart_b.remove(&ProductId::new("w1"));

        assert_eq!(cart_a.lines(), cart_b.lines());
        assert!(cart_a.lines().is_empty());
        assert_invariants(&cart_a);
    }

    #[test]
    fn test_set_quantity_on_missing_line_leaves_cart_unchanged() {
        let (mut cart, recorder) = session();

        cart.set_quantity(&ProductId::new("ghost"), 3);

        assert!(cart.lines().is_empty());
        // The mirror is still emitted, reflecting the unchanged (empty) cart.
        assert_eq!(recorder.actions(), vec!["updateCart"]);
        assert_eq!(recorder.last().data["count"], 0);
    }

    #[test]
    fn test_remove_missing_line_is_noop_on_collection() {
        let (mut cart, _recorder) = session();

        cart.add(product("w1", 85_000));
        cart.remove(&ProductId::new("ghost"));

        assert_eq!(cart.lines().len(), 1);
        assert_invariants(&cart);
    }

    #[test]
    fn test_clear_empties_and_mirrors_empty_cart() {
        let (mut cart, recorder) = session();

        cart.add(product("w1", 85_000));
        cart.add(product("w2", 120_000));
        cart.clear();

        assert!(cart.lines().is_empty());
        assert_eq!(cart.total_items(), 0);
        let mirror = recorder.last();
        assert_eq!(mirror.action, "updateCart");
        assert_eq!(mirror.data["count"], 0);
        assert!(mirror.data["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (mut cart, _recorder) = session();

        cart.add(product("w2", 120_000));
        cart.add(product("w1", 85_000));
        cart.add(product("w2", 120_000));

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, vec!["w2", "w1"]);
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let (mut cart, _recorder) = session();

        cart.add(product("w1", 85_000));
        cart.add(product("w1", 85_000));
        cart.add(product("w2", 120_000));

        // 2 * 850.00 + 1200.00
        assert_eq!(cart.subtotal(), Decimal::new(290_000, 2));
    }

    #[test]
    fn test_checkout_emits_cart_and_total() {
        let (mut cart, recorder) = session();

        cart.add(product("w1", 85_000));
        cart.checkout();

        let message = recorder.last();
        assert_eq!(message.action, "processCheckout");
        assert_eq!(message.data["items"].as_array().unwrap().len(), 1);
        assert!((message.data["total"].as_f64().unwrap() - 850.0).abs() < 1e-9);
        // Checkout does not consume the cart.
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_invariants_hold_across_mixed_sequences() {
        let (mut cart, _recorder) = session();

        cart.add(product("w1", 85_000));
        cart.add(product("w2", 120_000));
        cart.add(product("w1", 85_000));
        cart.set_quantity(&ProductId::new("w2"), 7);
        cart.remove(&ProductId::new("w1"));
        cart.add(product("w3", 250_000));
        cart.set_quantity(&ProductId::new("w3"), 0);
        assert_invariants(&cart);

        cart.clear();
        cart.add(product("w1", 85_000));
        assert_invariants(&cart);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_notification_sequence_matches_mutation_order() {
        let (mut cart, recorder) = session();

        cart.add(product("w1", 85_000));
        cart.set_quantity(&ProductId::new("w1"), 3);
        cart.remove(&ProductId::new("w1"));

        assert_eq!(
            recorder.actions(),
            vec!["addToCart", "updateCart", "updateCart", "updateCart"]
        );
    }
}
