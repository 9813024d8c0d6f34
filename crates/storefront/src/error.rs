//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Propagation policy: catalog read paths never surface errors here (the
//! resolver degrades to the static snapshot internally); write paths always
//! do, since masking a failed mutation would corrupt the administrator's
//! view of catalog state.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture backend failures to Sentry
        if matches!(
            self,
            Self::Catalog(
                CatalogError::Http(_) | CatalogError::Query { .. } | CatalogError::Parse(_)
            )
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Catalog(err) => match err {
                CatalogError::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                CatalogError::Http(_) | CatalogError::Query { .. } | CatalogError::Parse(_) => {
                    StatusCode::BAD_GATEWAY
                }
                CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Catalog(err) => match err {
                CatalogError::BackendUnavailable => {
                    "Remote backend required for this operation".to_string()
                }
                CatalogError::Http(_) | CatalogError::Query { .. } | CatalogError::Parse(_) => {
                    "External service error".to_string()
                }
                // Validation details come from the backend and are meant for
                // the administrator's eyes.
                CatalogError::Validation(message) => message.clone(),
                CatalogError::NotFound(what) => format!("Not found: {what}"),
            },
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
