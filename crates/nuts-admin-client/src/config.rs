//! Admin API client configuration.
//!
//! Points the client at the console backend. Defaults target a backend on
//! the local machine. Override via environment variables or explicit
//! construction for tests.

use url::Url;

/// Default console backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1305";

/// Configuration for connecting to the console backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the console backend; request paths are appended to it.
    pub base_url: Url,
    /// Where an operator should be sent when the backend answers 401.
    /// When unset, a 401 is an ordinary HTTP error.
    pub forbidden_route: Option<String>,
    /// Request timeout in seconds. `None` leaves timing to the transport.
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Configuration for `base_url` with no forbidden route and no timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            forbidden_route: None,
            timeout_secs: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `NUTS_ADMIN_URL` (default: `http://localhost:1305`)
    /// - `NUTS_ADMIN_FORBIDDEN_ROUTE` (optional)
    /// - `NUTS_ADMIN_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_url("NUTS_ADMIN_URL", DEFAULT_BASE_URL)?;
        let forbidden_route = std::env::var("NUTS_ADMIN_FORBIDDEN_ROUTE")
            .ok()
            .filter(|s| !s.is_empty());
        let timeout_secs = match std::env::var("NUTS_ADMIN_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidTimeout("NUTS_ADMIN_TIMEOUT_SECS".to_string(), raw.clone())
            })?),
            Err(_) => None,
        };
        Ok(Self {
            base_url,
            forbidden_route,
            timeout_secs,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        let url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self {
            base_url: url,
            forbidden_route: None,
            timeout_secs: Some(5),
        })
    }

    /// Set the forbidden route.
    pub fn with_forbidden_route(mut self, route: impl Into<String>) -> Self {
        self.forbidden_route = Some(route.into());
        self
    }
}

pub(crate) fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

/// Parse `raw` as the value of `var`.
fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout for {0}: {1:?}")]
    InvalidTimeout(String, String),
}
