//! # Standard Credential Templates
//!
//! Templates are versioned by their first `@context` URI. Two revisions of
//! the same credential can coexist as separate types with different subject
//! layouts:
//!
//! | Type | Context | Subject |
//! |------|---------|---------|
//! | `NutsOrganizationCredential` | `nuts.nl/credentials/v1` | `organization.{name,city}` |
//! | `NutsURACredential` | `nuts.nl/credentials/v1` | `organization.ura` |
//! | `NutsUraCredential` | `nuts.nl/credentials/2024` | `organization.{ura,name,city}` |
//! | `URACredential` | `nuts-services.nl/jsonld/credentials/experimental` | `ura` |

use serde_json::Value;

use crate::credential::{CredentialDocument, W3C_CREDENTIALS_V1_CONTEXT};
use crate::template::{object, CredentialTemplate, FieldSpec, FieldValues, TemplateError};

/// Nuts credentials context, first revision.
pub const NUTS_V1_CONTEXT: &str = "https://nuts.nl/credentials/v1";

/// Nuts credentials context, 2024 revision.
pub const NUTS_2024_CONTEXT: &str = "https://nuts.nl/credentials/2024";

/// Experimental context of the Nuts services JSON-LD vocabulary.
pub const NUTS_SERVICES_EXPERIMENTAL_CONTEXT: &str =
    "https://nuts-services.nl/jsonld/credentials/experimental";

const URA_FIELD: FieldSpec = FieldSpec {
    name: "URA",
    description: "UZI register abonneenummer (URA)",
};

// ---------------------------------------------------------------------------

/// Organization name and location (`NutsOrganizationCredential`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NutsOrganizationCredential;

impl NutsOrganizationCredential {
    const FIELDS: [FieldSpec; 2] = [
        FieldSpec {
            name: "Name",
            description: "The name of the organization",
        },
        FieldSpec {
            name: "Location",
            description: "The name of the city or municipality where the organization is located",
        },
    ];
}

impl CredentialTemplate for NutsOrganizationCredential {
    fn type_name(&self) -> &str {
        "NutsOrganizationCredential"
    }

    fn fields(&self) -> &[FieldSpec] {
        &Self::FIELDS
    }

    fn render(
        &self,
        issuer: &str,
        subject: &str,
        field_values: &[String],
    ) -> Result<CredentialDocument, TemplateError> {
        let values = FieldValues::new(self, field_values)?;
        let organization = object([("name", values.get(0)?), ("city", values.get(1)?)]);
        Ok(CredentialDocument::new(
            &[NUTS_V1_CONTEXT, W3C_CREDENTIALS_V1_CONTEXT],
            issuer,
            subject,
            object([("organization", Value::Object(organization))]),
            self.type_name(),
        ))
    }
}

// ---------------------------------------------------------------------------

/// URA number on the v1 context (`NutsURACredential`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NutsUraCredentialV1;

impl NutsUraCredentialV1 {
    const FIELDS: [FieldSpec; 1] = [URA_FIELD];
}

impl CredentialTemplate for NutsUraCredentialV1 {
    fn type_name(&self) -> &str {
        "NutsURACredential"
    }

    fn fields(&self) -> &[FieldSpec] {
        &Self::FIELDS
    }

    fn render(
        &self,
        issuer: &str,
        subject: &str,
        field_values: &[String],
    ) -> Result<CredentialDocument, TemplateError> {
        let values = FieldValues::new(self, field_values)?;
        let organization = object([("ura", values.get(0)?)]);
        Ok(CredentialDocument::new(
            &[NUTS_V1_CONTEXT, W3C_CREDENTIALS_V1_CONTEXT],
            issuer,
            subject,
            object([("organization", Value::Object(organization))]),
            self.type_name(),
        ))
    }
}

// ---------------------------------------------------------------------------

/// URA number, name and city on the 2024 context (`NutsUraCredential`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NutsUraCredential2024;

impl NutsUraCredential2024 {
    const FIELDS: [FieldSpec; 3] = [
        URA_FIELD,
        FieldSpec {
            name: "Name",
            description: "Name of the care organization",
        },
        FieldSpec {
            name: "City",
            description: "Location where the care organization is based",
        },
    ];
}

impl CredentialTemplate for NutsUraCredential2024 {
    fn type_name(&self) -> &str {
        "NutsUraCredential"
    }

    fn fields(&self) -> &[FieldSpec] {
        &Self::FIELDS
    }

    fn render(
        &self,
        issuer: &str,
        subject: &str,
        field_values: &[String],
    ) -> Result<CredentialDocument, TemplateError> {
        let values = FieldValues::new(self, field_values)?;
        let organization = object([
            ("ura", values.get(0)?),
            ("name", values.get(1)?),
            ("city", values.get(2)?),
        ]);
        Ok(CredentialDocument::new(
            &[NUTS_2024_CONTEXT, W3C_CREDENTIALS_V1_CONTEXT],
            issuer,
            subject,
            object([("organization", Value::Object(organization))]),
            self.type_name(),
        ))
    }
}

// ---------------------------------------------------------------------------

/// URA number directly on the subject (`URACredential`).
#[derive(Debug, Clone, Copy, Default)]
pub struct UraCredential;

impl UraCredential {
    const FIELDS: [FieldSpec; 1] = [URA_FIELD];
}

impl CredentialTemplate for UraCredential {
    fn type_name(&self) -> &str {
        "URACredential"
    }

    fn fields(&self) -> &[FieldSpec] {
        &Self::FIELDS
    }

    fn render(
        &self,
        issuer: &str,
        subject: &str,
        field_values: &[String],
    ) -> Result<CredentialDocument, TemplateError> {
        let values = FieldValues::new(self, field_values)?;
        Ok(CredentialDocument::new(
            &[NUTS_SERVICES_EXPERIMENTAL_CONTEXT, W3C_CREDENTIALS_V1_CONTEXT],
            issuer,
            subject,
            object([("ura", values.get(0)?)]),
            self.type_name(),
        ))
    }
}
