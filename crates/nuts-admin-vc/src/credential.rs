//! # Credential Document
//!
//! The unsigned credential payload the console submits for issuance. The
//! node adds `id`, `issuanceDate` and the proof; the console only supplies
//! context, issuer, subject and type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The universal base credential type.
pub const VERIFIABLE_CREDENTIAL_TYPE: &str = "VerifiableCredential";

/// W3C Verifiable Credentials v1 JSON-LD context.
pub const W3C_CREDENTIALS_V1_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// An unsigned verifiable credential as rendered by a template.
///
/// `credential_subject` is an open map: every template lays out its own
/// claims, but the map always carries `id` = subject identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialDocument {
    /// JSON-LD context URIs, in order.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// Issuer identifier (DID).
    pub issuer: String,

    /// Subject claims, keyed by template-specific fields plus `id`.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: Map<String, Value>,

    /// Credential types, in order. Always contains `VerifiableCredential`.
    #[serde(rename = "type")]
    pub credential_type: Vec<String>,
}

impl CredentialDocument {
    /// Assemble a document for a single specific credential type.
    ///
    /// `claims` are placed in the subject next to `id`; the type list is
    /// `[type_name, "VerifiableCredential"]`.
    pub fn new(
        context: &[&str],
        issuer: &str,
        subject: &str,
        claims: Map<String, Value>,
        type_name: &str,
    ) -> Self {
        let mut credential_subject = claims;
        credential_subject.insert("id".to_string(), Value::String(subject.to_string()));

        Self {
            context: context.iter().map(|c| (*c).to_string()).collect(),
            issuer: issuer.to_string(),
            credential_subject,
            credential_type: vec![type_name.to_string(), VERIFIABLE_CREDENTIAL_TYPE.to_string()],
        }
    }

    /// The subject identifier (`credentialSubject.id`), if present.
    pub fn subject_id(&self) -> Option<&str> {
        self.credential_subject.get("id").and_then(Value::as_str)
    }

    /// Whether `"VerifiableCredential"` is among the types.
    pub fn contains_vc_type(&self) -> bool {
        self.credential_type
            .iter()
            .any(|t| t == VERIFIABLE_CREDENTIAL_TYPE)
    }
}
