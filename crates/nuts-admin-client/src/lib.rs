//! # nuts-admin-client -- Typed Rust client for the Nuts admin console backend
//!
//! Everything the console does against its backend goes through one
//! [`ApiClient`], which owns authentication, body encoding, response
//! parsing and error classification. On top of it sit typed sub-clients:
//! - **Identities** via `/api/id`
//! - **Issuer** via `/api/issuer/vc` and the proxied VCR API
//! - **Discovery** via the proxied discovery API
//!
//! ## Path Convention
//!
//! Proxied node APIs live under `{base_url}/api/proxy/internal/...`. Every
//! dynamic path segment (DIDs, service ids) is passed through
//! [`nuts_admin_core::encode_uri_path`].

pub mod api;
pub mod config;
pub mod discovery;
pub mod error;
pub mod identity;
pub mod issuer;
pub mod navigate;
pub mod token;

pub use api::{ApiClient, ApiResponse, RequestOptions};
pub use config::ApiConfig;
pub use error::{ApiError, ApiErrorKind, ErrorBody};
pub use navigate::{handle_unauthorized, Navigator};
pub use token::{EnvToken, NoToken, SessionFile, StaticToken, TokenProvider};

use std::sync::Arc;

/// Top-level admin API client. Holds sub-clients for each area.
#[derive(Debug, Clone)]
pub struct AdminClient {
    api: ApiClient,
    identities: identity::IdentityClient,
    issuer: issuer::IssuerClient,
    discovery: discovery::DiscoveryClient,
}

impl AdminClient {
    /// Create a new admin client from configuration.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let api = ApiClient::new(config, tokens)?;
        Ok(Self {
            identities: identity::IdentityClient::new(api.clone()),
            issuer: issuer::IssuerClient::new(api.clone()),
            discovery: discovery::DiscoveryClient::new(api.clone()),
            api,
        })
    }

    /// Access the generic transport.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Access the identities client.
    pub fn identities(&self) -> &identity::IdentityClient {
        &self.identities
    }

    /// Access the issuer client.
    pub fn issuer(&self) -> &issuer::IssuerClient {
        &self.issuer
    }

    /// Access the discovery client.
    pub fn discovery(&self) -> &discovery::DiscoveryClient {
        &self.discovery
    }
}
