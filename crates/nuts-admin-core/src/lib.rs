//! # nuts-admin-core — Foundational Types for the Admin Console
//!
//! Leaf crate of the workspace. Defines the primitives every other crate
//! builds on:
//!
//! - **URI path encoding** ([`encode_uri_path`]): percent-encodes dynamic
//!   path segments while keeping `:` intact, so DIDs and credential IDs can
//!   be addressed in backend paths.
//! - **Identifier newtypes** ([`Did`], [`Identity`]): validated DIDs and the
//!   operator-facing identity view derived from them.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `nuts-admin-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod path;

pub use error::ValidationError;
pub use identity::{Did, Identity};
pub use path::{encode_uri_path, join_path_segments};
