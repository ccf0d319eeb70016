//! Typed client for discovery services, proxied to the node's internal
//! discovery API.

use std::collections::BTreeSet;

use nuts_admin_core::join_path_segments;
use nuts_admin_vc::DiscoveryServiceDefinition;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::{ApiClient, ApiResponse, RequestOptions};
use crate::error::ApiError;

const DISCOVERY_PATH: &str = "/api/proxy/internal/discovery/v1";

/// Outcome of an activation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    /// Why registration is still pending, when the node accepted the
    /// activation without registering yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Client for discovery services.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    api: ApiClient,
}

impl DiscoveryClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Discovery services known to the node.
    pub async fn services(&self) -> Result<Vec<DiscoveryServiceDefinition>, ApiError> {
        self.api.get_json(DISCOVERY_PATH, &Default::default()).await
    }

    /// Credential types required by service `service_id`.
    ///
    /// Returns [`ApiError::ServiceNotFound`] when the node does not list it.
    pub async fn requirements(&self, service_id: &str) -> Result<BTreeSet<String>, ApiError> {
        self.services()
            .await?
            .into_iter()
            .find(|s| s.id == service_id)
            .map(|s| s.required_credential_types())
            .ok_or_else(|| ApiError::ServiceNotFound(service_id.to_string()))
    }

    /// Presentations registered on `service_id`, optionally filtered by
    /// credential fields (`credentialSubject.organization.city=...`).
    pub async fn search(
        &self,
        service_id: &str,
        filters: &[(String, String)],
    ) -> Result<Vec<Value>, ApiError> {
        let path = format!("{DISCOVERY_PATH}/{}", join_path_segments([service_id]));
        let options = RequestOptions {
            query: filters.to_vec(),
            ..Default::default()
        };
        self.api.get_json(&path, &options).await
    }

    /// Register `subject` on `service_id`.
    ///
    /// `parameters` become the registration parameters of the presentation.
    pub async fn activate(
        &self,
        service_id: &str,
        subject: &str,
        parameters: Option<Map<String, Value>>,
    ) -> Result<Activation, ApiError> {
        let path = activation_path(service_id, subject);
        let body = parameters.map(|p| {
            let mut body = Map::new();
            body.insert("registrationParameters".to_string(), Value::Object(p));
            Value::Object(body)
        });
        let endpoint = format!("POST {path}");
        match self
            .api
            .invoke(Method::POST, &path, body, &RequestOptions::default())
            .await?
        {
            ApiResponse::NoContent { .. } | ApiResponse::Text(_) => Ok(Activation::default()),
            json @ ApiResponse::Json(_) => json.into_json(&endpoint),
        }
    }

    /// Remove `subject` from `service_id`.
    pub async fn deactivate(&self, service_id: &str, subject: &str) -> Result<(), ApiError> {
        self.api.delete(&activation_path(service_id, subject)).await?;
        Ok(())
    }
}

fn activation_path(service_id: &str, subject: &str) -> String {
    format!("{DISCOVERY_PATH}/{}", join_path_segments([service_id, subject]))
}
