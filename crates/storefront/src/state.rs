//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::CartSession;
use crate::catalog::{CatalogMutator, CatalogResolver, SupabaseClient};
use crate::config::StorefrontConfig;
use crate::nui::HostChannel;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The backend client is built
/// here, once, from the configuration captured at startup, and injected into
/// both the resolver and the mutator; there is no re-evaluation mid-session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    resolver: CatalogResolver,
    mutator: CatalogMutator,
    host: HostChannel,
    cart: Mutex<CartSession>,
}

impl AppState {
    /// Create the application state from configuration and a host channel.
    #[must_use]
    pub fn new(config: StorefrontConfig, host: HostChannel) -> Self {
        let remote = config.supabase.as_ref().map(SupabaseClient::new);
        let resolver = CatalogResolver::new(remote.clone());
        let mutator = CatalogMutator::new(remote);
        let cart = Mutex::new(CartSession::new(host.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                resolver,
                mutator,
                host,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog read surface.
    #[must_use]
    pub fn resolver(&self) -> &CatalogResolver {
        &self.inner.resolver
    }

    /// Get a reference to the catalog write surface.
    #[must_use]
    pub fn mutator(&self) -> &CatalogMutator {
        &self.inner.mutator
    }

    /// Get a reference to the host channel.
    #[must_use]
    pub fn host(&self) -> &HostChannel {
        &self.inner.host
    }

    /// Lock the cart session. Mutations serialize here, so the emitted host
    /// notification sequence matches the logical mutation order. Do not hold
    /// the guard across an await point.
    pub fn cart(&self) -> MutexGuard<'_, CartSession> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
