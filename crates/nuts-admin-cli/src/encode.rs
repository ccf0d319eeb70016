//! # Encode Subcommand
//!
//! Prints the percent-encoded form of a path segment, the same encoding the
//! client applies to DIDs and service ids in request paths.

use anyhow::Result;
use clap::Args;
use nuts_admin_core::{encode_uri_path, join_path_segments};

/// Arguments for the `nuts-admin encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Values to encode.
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Encode each value as a segment and join them with `/`.
    #[arg(long)]
    pub join: bool,
}

/// Encoded output lines for `args`.
pub fn encoded_lines(args: &EncodeArgs) -> Vec<String> {
    if args.join {
        vec![join_path_segments(&args.values)]
    } else {
        args.values.iter().map(|v| encode_uri_path(v)).collect()
    }
}

/// Execute the encode subcommand.
pub fn run_encode(args: &EncodeArgs) -> Result<u8> {
    for line in encoded_lines(args) {
        println!("{line}");
    }
    Ok(0)
}
