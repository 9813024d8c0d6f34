//! Host channel bridge for outbound NUI notifications.
//!
//! The storefront runs as an overlay inside a host game client and mirrors
//! cart state to it over a one-way, best-effort channel. Delivery must never
//! block a cart operation and must never fail it: when the host is absent
//! (standalone development, preview) messages are logged and the call still
//! succeeds. No acknowledgment is ever read back.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use nui_market_core::{CartLine, Product};

/// Actions recognized by the host process.
pub mod action {
    /// Emitted once at startup with the catalog size.
    pub const NUI_READY: &str = "nuiReady";
    /// A product was added to the cart (quantity delta 1).
    pub const ADD_TO_CART: &str = "addToCart";
    /// Full cart-state mirror after any mutation.
    pub const UPDATE_CART: &str = "updateCart";
    /// The cart is being checked out.
    pub const PROCESS_CHECKOUT: &str = "processCheckout";
    /// The overlay asks the host to close it.
    pub const CLOSE_NUI: &str = "closeNUI";
}

/// A one-way message to the host process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NuiMessage {
    pub action: String,
    pub data: Value,
}

/// Delivery capability for [`NuiMessage`]s.
///
/// Implementations must not block the caller and must not surface failures;
/// anything that goes wrong is logged and swallowed.
pub trait HostTransport: Send + Sync {
    fn deliver(&self, message: NuiMessage);
}

/// Handle for sending host notifications. Cheaply cloneable.
#[derive(Clone)]
pub struct HostChannel {
    transport: Arc<dyn HostTransport>,
}

impl HostChannel {
    pub fn new(transport: impl HostTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Select the transport from configuration: a callback endpoint when the
    /// host is attached, log-only otherwise.
    #[must_use]
    pub fn from_config(callback_url: Option<&str>) -> Self {
        callback_url.map_or_else(
            || Self::new(LogTransport),
            |url| Self::new(CallbackTransport::new(url)),
        )
    }

    /// Send a message to the host. Never blocks, never fails.
    pub fn send(&self, action: &str, data: Value) {
        self.transport.deliver(NuiMessage {
            action: action.to_string(),
            data,
        });
    }
}

/// Fire-and-forget delivery to the host callback endpoint. The POST runs on
/// a spawned task; failures are logged, never propagated.
pub struct CallbackTransport {
    client: reqwest::Client,
    url: String,
}

impl CallbackTransport {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

impl HostTransport for CallbackTransport {
    fn deliver(&self, message: NuiMessage) {
        let client = self.client.clone();
        let url = self.url.clone();

        tokio::spawn(async move {
            let action = message.action.clone();
            match client.post(&url).json(&message).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(action, "delivered host notification");
                }
                Ok(response) => {
                    warn!(
                        action,
                        status = %response.status(),
                        "host rejected notification"
                    );
                }
                Err(error) => {
                    warn!(action, %error, "host notification delivery failed");
                }
            }
        });
    }
}

/// Host-absent transport: logs the message and reports success, so the
/// storefront stays usable outside the host process.
pub struct LogTransport;

impl HostTransport for LogTransport {
    fn deliver(&self, message: NuiMessage) {
        info!(
            action = %message.action,
            data = %message.data,
            "host channel message (no host attached)"
        );
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Wire payload builders. Keys are camelCase, as the host expects.
pub mod payload {
    use super::{CartLine, Decimal, Product, Utc, Value, json};

    fn timestamp_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn item_count(lines: &[CartLine]) -> u32 {
        lines.iter().map(|line| line.quantity).sum()
    }

    fn cart_total(lines: &[CartLine]) -> Decimal {
        lines.iter().map(CartLine::line_total).sum()
    }

    /// Payload for [`super::action::NUI_READY`].
    #[must_use]
    pub fn ready(product_count: usize, category_count: usize) -> Value {
        json!({
            "timestamp": timestamp_ms(),
            "productCount": product_count,
            "categoryCount": category_count,
        })
    }

    /// Payload for [`super::action::ADD_TO_CART`].
    #[must_use]
    pub fn product_added(product: &Product, quantity: u32) -> Value {
        json!({
            "product": product,
            "quantity": quantity,
            "timestamp": timestamp_ms(),
        })
    }

    /// Payload for [`super::action::UPDATE_CART`]: the full cart mirror.
    #[must_use]
    pub fn cart_state(lines: &[CartLine]) -> Value {
        json!({
            "items": lines,
            "count": item_count(lines),
            "total": cart_total(lines),
        })
    }

    /// Payload for [`super::action::PROCESS_CHECKOUT`].
    #[must_use]
    pub fn checkout(lines: &[CartLine]) -> Value {
        json!({
            "items": lines,
            "total": cart_total(lines),
            "timestamp": timestamp_ms(),
        })
    }
}
