//! Admin API client error types.
//!
//! Every failure reaches the immediate caller as an [`ApiError`]; nothing is
//! retried. [`ApiError::kind`] gives callers a flat discriminator to branch
//! on (the CLI turns [`ApiErrorKind::Unauthorized`] into a sign-in hint).

use std::fmt;

use nuts_admin_vc::TemplateError;
use serde_json::Value;

use crate::config::ConfigError;

/// Error payload of a non-success response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// The `error` member of a JSON body (`null` when absent).
    Json(Value),
    /// A plain-text body, or the status text when the body was unreadable.
    Text(String),
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(Value::String(s)) | Self::Text(s) => f.write_str(s),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

/// Errors from admin API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The backend returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: ErrorBody,
    },
    /// The backend returned 401 and a forbidden route is configured.
    #[error("{endpoint} requires authentication, continue at {redirect_to}")]
    Unauthorized {
        endpoint: String,
        redirect_to: String,
    },
    /// A declared JSON body could not be parsed.
    #[error("failed to parse response from {endpoint} (status {status}): {source}")]
    Parse {
        endpoint: String,
        status: u16,
        source: serde_json::Error,
    },
    /// The request body could not be serialized.
    #[error("failed to encode request body for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        source: serde_json::Error,
    },
    /// A parsed body did not match the expected type.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
    /// A header could not be built from the given value.
    #[error("invalid value for header {name}")]
    InvalidHeader { name: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The node does not list the requested discovery service.
    #[error("discovery service not found: {0}")]
    ServiceNotFound(String),
    /// No template is registered for the requested credential type.
    #[error("no credential template for type {0}")]
    UnknownTemplate(String),
    /// Rendering the credential failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Flat discriminator over [`ApiError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Transport,
    Http,
    Unauthorized,
    Parse,
    Encode,
    Decode,
    Config,
    ServiceNotFound,
    Template,
}

impl ApiError {
    /// The error's kind.
    ///
    /// `InvalidHeader` reports as [`ApiErrorKind::Config`] and
    /// `UnknownTemplate` as [`ApiErrorKind::Template`].
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Transport { .. } => ApiErrorKind::Transport,
            Self::Http { .. } => ApiErrorKind::Http,
            Self::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            Self::Parse { .. } => ApiErrorKind::Parse,
            Self::Encode { .. } => ApiErrorKind::Encode,
            Self::Decode { .. } => ApiErrorKind::Decode,
            Self::InvalidHeader { .. } | Self::Config(_) => ApiErrorKind::Config,
            Self::ServiceNotFound(_) => ApiErrorKind::ServiceNotFound,
            Self::UnknownTemplate(_) | Self::Template(_) => ApiErrorKind::Template,
        }
    }

    /// HTTP status of the response that caused the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Parse { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    /// Navigation target of an [`ApiError::Unauthorized`].
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { redirect_to, .. } => Some(redirect_to),
            _ => None,
        }
    }
}
