//! # nuts-admin-vc — Credential Templates and Discovery Requirements
//!
//! Pure data transforms, no I/O:
//!
//! - **Credential documents** ([`CredentialDocument`]): the JSON-LD shaped
//!   payload submitted to the node's issuance endpoint.
//! - **Templates** ([`CredentialTemplate`]): each credential type the
//!   console can issue is a concrete implementation that declares its
//!   ordered input fields and renders a document from positional values.
//! - **Registry** ([`TemplateRegistry`]): immutable name → template map,
//!   built once at start-up. Duplicate names are rejected.
//! - **Discovery requirements** ([`required_credential_types`]): reads a
//!   discovery service's presentation definition and returns the credential
//!   types it demands.
//!
//! Rendering and extraction are synchronous and reentrant; the registry is
//! `Send + Sync` and can be shared freely.

pub mod credential;
pub mod discovery;
pub mod presentation;
pub mod registry;
pub mod template;
pub mod templates;

pub use credential::{CredentialDocument, VERIFIABLE_CREDENTIAL_TYPE, W3C_CREDENTIALS_V1_CONTEXT};
pub use discovery::{required_credential_types, DiscoveryServiceDefinition, ServiceActivation};
pub use presentation::{Constraints, Field, Filter, InputDescriptor, PresentationDefinition};
pub use registry::{RegistryError, TemplateRegistry, TemplateRegistryBuilder};
pub use template::{CredentialTemplate, FieldSpec, TemplateError};
