//! Integration tests for NUI Market.
//!
//! Scenarios drive the storefront router directly with
//! `tower::ServiceExt::oneshot`, so the whole suite runs hermetically: no
//! server process, no database, no network. The host process is replaced by
//! a recording transport so tests can assert on the exact notification
//! sequence the engine emits.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use nui_market_storefront::config::{StorefrontConfig, SupabaseConfig};
use nui_market_storefront::nui::{HostChannel, HostTransport, NuiMessage};
use nui_market_storefront::routes;
use nui_market_storefront::state::AppState;

/// Host transport that records every delivered message for assertions.
#[derive(Default)]
pub struct RecordingTransport {
    messages: Mutex<Vec<NuiMessage>>,
}

impl RecordingTransport {
    /// All recorded messages, in emission order.
    #[must_use]
    pub fn messages(&self) -> Vec<NuiMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The action names of all recorded messages, in emission order.
    #[must_use]
    pub fn actions(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.action).collect()
    }
}

/// Local newtype around the shared recorder so a crate-local type can
/// implement the foreign `HostTransport` trait — the orphan rule forbids
/// implementing it directly for `Arc<RecordingTransport>`.
struct SharedRecorder(Arc<RecordingTransport>);

impl HostTransport for SharedRecorder {
    fn deliver(&self, message: NuiMessage) {
        self.0
            .messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}

/// A storefront service under test, plus handles for assertions.
pub struct TestContext {
    router: Router,
    /// Messages the engine emitted toward the host process.
    pub host: Arc<RecordingTransport>,
    /// The state backing the router, for direct component access.
    pub state: AppState,
}

impl TestContext {
    /// Context in fallback mode: no backend configured, recording host.
    #[must_use]
    pub fn fallback() -> Self {
        Self::with_config(base_config(None))
    }

    /// Context whose backend configuration points at a closed loopback
    /// port, so every remote query fails and the degradation paths run.
    #[must_use]
    pub fn unreachable_backend() -> Self {
        Self::with_config(base_config(Some(SupabaseConfig {
            url: "http://127.0.0.1:9".to_string(),
            anon_key: secrecy::SecretString::from("test-anon-key"),
        })))
    }

    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        let host = Arc::new(RecordingTransport::default());
        let state = AppState::new(config, HostChannel::new(SharedRecorder(Arc::clone(&host))));
        let router = routes::routes().with_state(state.clone());
        Self {
            router,
            host,
            state,
        }
    }

    /// Issue a GET request and return status plus decoded body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    /// Issue a request with an optional JSON body, returning the status and
    /// the response body (JSON-decoded when possible, a string otherwise).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                builder
                    .body(Body::from(json.to_string()))
                    .expect("request build failed")
            }
            None => builder.body(Body::empty()).expect("request build failed"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router call failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body read failed");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }
}

fn base_config(supabase: Option<SupabaseConfig>) -> StorefrontConfig {
    StorefrontConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        supabase,
        nui_callback_url: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}
