//! Typed client for credential issuance and wallet upload.
//!
//! Issuance and search go through the console's proxy to the node's
//! internal VCR API; the aggregated issued-credentials listing is served by
//! the console itself.

use nuts_admin_core::encode_uri_path;
use nuts_admin_vc::{CredentialDocument, TemplateRegistry};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, RequestOptions};
use crate::error::ApiError;

const ISSUED_PATH: &str = "/api/issuer/vc";
const ISSUE_PATH: &str = "/api/proxy/internal/vcr/v2/issuer/vc";
const SEARCH_PATH: &str = "/api/proxy/internal/vcr/v2/issuer/vc/search";
const HOLDER_PATH: &str = "/api/proxy/internal/vcr/v2/holder";

/// One hit of an issuer search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub verifiable_credential: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation: Option<Value>,
}

/// Result of an issuer search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub verifiable_credentials: Vec<SearchHit>,
}

/// Client for issuing credentials.
#[derive(Debug, Clone)]
pub struct IssuerClient {
    api: ApiClient,
}

impl IssuerClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Ask the node to sign and issue `document`; returns the signed credential.
    pub async fn issue(&self, document: &CredentialDocument) -> Result<Value, ApiError> {
        self.api.post_json(ISSUE_PATH, document).await
    }

    /// Render `type_name` from `registry` and issue the result.
    pub async fn issue_from_template(
        &self,
        registry: &TemplateRegistry,
        type_name: &str,
        issuer: &str,
        subject: &str,
        field_values: &[String],
    ) -> Result<Value, ApiError> {
        let template = registry
            .get(type_name)
            .ok_or_else(|| ApiError::UnknownTemplate(type_name.to_string()))?;
        let document = template.render(issuer, subject, field_values)?;
        tracing::debug!(credential_type = type_name, %issuer, %subject, "issuing rendered credential");
        self.issue(&document).await
    }

    /// Credentials of the given types issued by any managed identity.
    ///
    /// Calls `GET /api/issuer/vc?credentialTypes=a,b`.
    pub async fn issued_credentials(&self, credential_types: &[&str]) -> Result<Vec<Value>, ApiError> {
        let options = RequestOptions::with_query([("credentialTypes", credential_types.join(","))]);
        self.api.get_json(ISSUED_PATH, &options).await
    }

    /// Search credentials issued by `issuer`, optionally narrowed to one type.
    pub async fn search_issued(
        &self,
        issuer: &str,
        credential_type: Option<&str>,
    ) -> Result<SearchResults, ApiError> {
        let mut query = vec![("issuer".to_string(), issuer.to_string())];
        if let Some(t) = credential_type {
            query.push(("credentialType".to_string(), t.to_string()));
        }
        let options = RequestOptions {
            query,
            ..Default::default()
        };
        self.api.get_json(SEARCH_PATH, &options).await
    }

    /// Store `credential` in the wallet of `subject`.
    ///
    /// Calls `POST /api/proxy/internal/vcr/v2/holder/{subject}/vc`; the node
    /// answers 204.
    pub async fn load_into_wallet(&self, subject: &str, credential: &Value) -> Result<(), ApiError> {
        let path = format!("{HOLDER_PATH}/{}/vc", encode_uri_path(subject));
        self.api
            .invoke(
                Method::POST,
                &path,
                Some(credential.clone()),
                &RequestOptions::default(),
            )
            .await?;
        Ok(())
    }
}
