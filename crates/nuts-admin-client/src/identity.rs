//! Typed client for the console's identity endpoints (`/api/id`).

use nuts_admin_core::{encode_uri_path, Identity};
use nuts_admin_vc::ServiceActivation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ApiClient;
use crate::error::ApiError;

const IDENTITIES_PATH: &str = "/api/id";

/// Request body of `POST /api/id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIdentityRequest {
    /// Short name the new DID is derived from.
    pub subject: String,
}

/// An identity with its DID document, discovery status and wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDetails {
    #[serde(flatten)]
    pub identity: Identity,

    #[serde(default)]
    pub did_document: Value,

    /// Activation status per discovery service, ordered by service id.
    #[serde(default)]
    pub discovery_services: Vec<ServiceActivation>,

    #[serde(default)]
    pub wallet_credentials: Vec<Value>,
}

/// Client for identity management.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    api: ApiClient,
}

impl IdentityClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List the identities managed by the node.
    ///
    /// Calls `GET /api/id`.
    pub async fn list(&self) -> Result<Vec<Identity>, ApiError> {
        self.api
            .get_json(IDENTITIES_PATH, &Default::default())
            .await
    }

    /// Create an identity for `subject`.
    ///
    /// Calls `POST /api/id`.
    pub async fn create(&self, subject: &str) -> Result<Identity, ApiError> {
        let request = CreateIdentityRequest {
            subject: subject.to_string(),
        };
        self.api.post_json(IDENTITIES_PATH, &request).await
    }

    /// Details of the identity with DID `did`.
    ///
    /// Calls `GET /api/id/{did}`. Discovery statuses come back sorted by
    /// service id regardless of backend order.
    pub async fn get(&self, did: &str) -> Result<IdentityDetails, ApiError> {
        let path = format!("{IDENTITIES_PATH}/{}", encode_uri_path(did));
        let mut details: IdentityDetails = self.api.get_json(&path, &Default::default()).await?;
        details
            .discovery_services
            .sort_by(|a, b| a.service_id.cmp(&b.service_id));
        Ok(details)
    }
}
