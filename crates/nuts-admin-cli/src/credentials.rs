//! # Credentials Subcommand
//!
//! - `issue` — Render a template and have the node issue it.
//! - `issued` — Credentials of given types issued by managed identities.
//! - `search` — Search credentials issued by one DID.
//! - `upload` — Load a credential from a file into a subject's wallet.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use nuts_admin_client::AdminClient;
use nuts_admin_vc::TemplateRegistry;
use serde_json::Value;

use crate::{print_json, report};

/// Arguments for the `nuts-admin credentials` subcommand.
#[derive(Args, Debug)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommand,
}

/// Credentials subcommands.
#[derive(Subcommand, Debug)]
pub enum CredentialsCommand {
    /// Issue a credential from a template.
    Issue {
        /// Credential type, e.g. NutsUraCredential.
        credential_type: String,
        /// Issuer DID.
        #[arg(long)]
        issuer: String,
        /// Subject DID.
        #[arg(long)]
        subject: String,
        /// Field values, in the order listed by `templates list`.
        values: Vec<String>,
    },

    /// List issued credentials of the given types.
    Issued {
        /// Credential type; repeat for more.
        #[arg(long = "type", required = true)]
        types: Vec<String>,
    },

    /// Search credentials issued by a DID.
    Search {
        /// Issuer DID.
        #[arg(long)]
        issuer: String,
        /// Restrict to one credential type.
        #[arg(long = "type")]
        credential_type: Option<String>,
    },

    /// Load a credential into a subject's wallet.
    Upload {
        /// Subject DID owning the wallet.
        #[arg(long)]
        subject: String,
        /// File containing the credential (JSON object or JWT).
        file: PathBuf,
    },
}

/// Execute the credentials subcommand.
pub async fn run_credentials(args: &CredentialsArgs, client: &AdminClient) -> Result<u8> {
    match &args.command {
        CredentialsCommand::Issue {
            credential_type,
            issuer,
            subject,
            values,
        } => {
            let registry = TemplateRegistry::standard();
            let result = client
                .issuer()
                .issue_from_template(&registry, credential_type, issuer, subject, values)
                .await;
            report(client, result, |credential| print_json(&credential))
        }
        CredentialsCommand::Issued { types } => {
            let types: Vec<&str> = types.iter().map(String::as_str).collect();
            let result = client.issuer().issued_credentials(&types).await;
            report(client, result, |credentials| print_json(&credentials))
        }
        CredentialsCommand::Search {
            issuer,
            credential_type,
        } => {
            let result = client
                .issuer()
                .search_issued(issuer, credential_type.as_deref())
                .await;
            report(client, result, |results| print_json(&results))
        }
        CredentialsCommand::Upload { subject, file } => {
            let credential = read_credential(file)?;
            let result = client.issuer().load_into_wallet(subject, &credential).await;
            report(client, result, |()| {
                println!("OK: credential loaded into wallet of {subject}");
                Ok(())
            })
        }
    }
}

/// Read a credential file: a JSON-LD object, or a JWT as a JSON string.
pub fn read_credential(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading credential file {}", path.display()))?;
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        serde_json::from_str(trimmed)
            .with_context(|| format!("parsing credential file {}", path.display()))
    } else {
        Ok(Value::String(trimmed.to_string()))
    }
}
