//! # Identity Newtypes
//!
//! [`Did`] is a validated `did:<method>:<identifier>` string. [`Identity`] is
//! the operator-facing view of a DID managed by the node: a short display
//! name plus the DID itself.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A W3C Decentralized Identifier (`did:method:identifier`).
///
/// Validation is shallow: a lowercase alphanumeric method and a non-empty
/// method-specific identifier. Resolution is the node's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Did(String);

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let invalid = || ValidationError::InvalidDid(s.to_string());
        let rest = s.strip_prefix("did:").ok_or_else(invalid)?;
        let (method, identifier) = rest.split_once(':').ok_or_else(invalid)?;
        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if identifier.is_empty() {
            return Err(invalid());
        }
        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The DID method (`web` in `did:web:example.com`).
    pub fn method(&self) -> &str {
        self.parts().0
    }

    /// The method-specific identifier (`example.com:iam:1` in
    /// `did:web:example.com:iam:1`).
    pub fn method_specific_id(&self) -> &str {
        self.parts().1
    }

    fn parts(&self) -> (&str, &str) {
        // Both halves exist after validation.
        self.0[4..].split_once(':').unwrap_or(("", ""))
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An identity managed by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Short display name.
    pub name: String,
    /// The identity's DID.
    pub did: Did,
}

impl Identity {
    /// Derive the identity view from a DID.
    ///
    /// The name is the last colon-separated part of the method-specific
    /// identifier (`did:web:example.com:iam:acme` is named `acme`). A
    /// method-specific identifier without colons names the identity by the
    /// full DID.
    pub fn from_did(did: Did) -> Self {
        let id = did.method_specific_id();
        let name = match id.rsplit_once(':') {
            Some((_, last)) => last.to_string(),
            None => did.to_string(),
        };
        Self { name, did }
    }
}
