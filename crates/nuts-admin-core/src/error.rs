//! # Error Types
//!
//! Validation errors raised by the newtype constructors in this crate.

use thiserror::Error;

/// A value failed format validation at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string is not of the form `did:<method>:<identifier>`.
    #[error("invalid DID: {0:?}")]
    InvalidDid(String),
}
