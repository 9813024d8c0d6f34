//! Catalog resolution against the remote backend with static fallback.
//!
//! # Architecture
//!
//! - [`remote::SupabaseClient`] speaks PostgREST to the remote backend:
//!   equality filters, case-insensitive substring-or search, order-by-name,
//!   and insert/update/delete-by-id with the persisted row returned.
//! - [`static_data`] holds the embedded snapshot served whenever the backend
//!   is unreachable or unconfigured.
//! - [`resolver::CatalogResolver`] is the read surface: it degrades to the
//!   static snapshot on any remote failure so the storefront stays browsable.
//! - [`mutator::CatalogMutator`] is the write surface: writes require the
//!   live backend and never fall back.
//! - [`pipeline`] is the pure filter/sort pipeline applied to resolved
//!   products before rendering.
//!
//! Whether the backend is reachable is decided once at startup (config) and
//! injected into the resolver and mutator at construction time.

pub mod mutator;
pub mod pipeline;
pub mod remote;
pub mod resolver;
pub mod static_data;

pub use mutator::CatalogMutator;
pub use pipeline::{PipelineParams, SortKey, resolve};
pub use remote::SupabaseClient;
pub use resolver::{CatalogResolver, ProductFilter};

use thiserror::Error;

/// Errors that can occur when interacting with the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The remote backend is not configured for this session. Read paths
    /// silently substitute static data; write paths fail fast with this.
    #[error("remote backend is not available")]
    BackendUnavailable,

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected or failed the query.
    #[error("remote query failed: {status} - {message}")]
    Query { status: u16, message: String },

    /// The backend rejected a write as malformed (e.g., negative price).
    /// Surfaced unchanged to the caller.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A write referenced an entity that does not exist. Reads represent
    /// absence as `None`, never as this error.
    #[error("not found: {0}")]
    NotFound(String),
}
