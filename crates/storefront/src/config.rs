//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `SUPABASE_URL` - Remote backend endpoint URL
//! - `SUPABASE_ANON_KEY` - Remote backend access key
//! - `NUI_CALLBACK_URL` - Host process callback endpoint for outbound
//!   notifications (absent: log-only delivery, for standalone development)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! The backend is considered available only when **both** `SUPABASE_URL` and
//! `SUPABASE_ANON_KEY` are present. The decision is made once here, at
//! startup, and injected into the catalog resolver and mutator; a
//! misconfigured backend degrades the whole session to fallback mode rather
//! than flapping mid-session.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote backend configuration; `None` means fallback mode for the
    /// whole session
    pub supabase: Option<SupabaseConfig>,
    /// Host process callback endpoint; `None` means log-only delivery
    pub nui_callback_url: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote backend (Supabase) configuration.
///
/// Implements `Debug` manually to redact the access key.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Backend endpoint URL (e.g., <https://xyzcompany.supabase.co>)
    pub url: String,
    /// Backend access key
    pub anon_key: SecretString,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present variable fails to parse. Absent
    /// backend variables are not an error; they select fallback mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let supabase = SupabaseConfig::from_env()?;
        let nui_callback_url = get_optional_env("NUI_CALLBACK_URL");
        if let Some(url) = &nui_callback_url {
            Url::parse(url).map_err(|e| {
                ConfigError::InvalidEnvVar("NUI_CALLBACK_URL".to_string(), e.to_string())
            })?;
        }

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            supabase,
            nui_callback_url,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the remote backend can be reached this session.
    #[must_use]
    pub const fn backend_available(&self) -> bool {
        self.supabase.is_some()
    }
}

impl SupabaseConfig {
    /// Both the endpoint URL and the access key must be present; anything
    /// less means "unavailable, never attempted".
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(url), Some(anon_key)) = (
            get_optional_env("SUPABASE_URL"),
            get_optional_env("SUPABASE_ANON_KEY"),
        ) else {
            return Ok(None);
        };

        Url::parse(&url)
            .map_err(|e| ConfigError::InvalidEnvVar("SUPABASE_URL".to_string(), e.to_string()))?;

        Ok(Some(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: SecretString::from(anon_key),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as absent.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
