//! # Discovery Services
//!
//! A discovery service admits a subject once it presents credentials that
//! satisfy the service's presentation definition. Before offering a service
//! to the operator, the console works out which credential types the
//! definition demands with [`required_credential_types`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::credential::VERIFIABLE_CREDENTIAL_TYPE;
use crate::presentation::PresentationDefinition;

/// Credential types required by a presentation definition.
///
/// Collects `filter.const` of every field constraint whose `path` contains
/// `$.type` and whose `filter.type` is `"string"`, across all input
/// descriptors. Fields without a filter, with another filter type or
/// without a string `const` are skipped. `VerifiableCredential` is dropped
/// since every credential carries it. A definition without qualifying
/// constraints yields an empty set.
pub fn required_credential_types(definition: &PresentationDefinition) -> BTreeSet<String> {
    definition
        .input_descriptors
        .iter()
        .flat_map(|descriptor| descriptor.constraints.fields.iter())
        .filter_map(|field| field.required_type())
        .filter(|t| *t != VERIFIABLE_CREDENTIAL_TYPE)
        .map(str::to_string)
        .collect()
}

/// A discovery service as listed by the node.
///
/// Only the presentation definition is interpreted; `endpoint` and any
/// other metadata are carried verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryServiceDefinition {
    /// Service identifier.
    pub id: String,

    /// Endpoint of the discovery server.
    #[serde(default)]
    pub endpoint: String,

    /// What a subject must present to be admitted.
    #[serde(default)]
    pub presentation_definition: PresentationDefinition,

    /// Remaining service metadata (e.g. `presentation_max_validity`).
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl DiscoveryServiceDefinition {
    /// Credential types this service requires.
    pub fn required_credential_types(&self) -> BTreeSet<String> {
        required_credential_types(&self.presentation_definition)
    }
}

/// Activation status of a subject on a discovery service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceActivation {
    /// Service identifier.
    #[serde(rename = "id")]
    pub service_id: String,

    /// Whether the subject is registered on the service.
    pub active: bool,

    /// The registered presentation, when active.
    #[serde(rename = "vp", default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<Value>,
}
