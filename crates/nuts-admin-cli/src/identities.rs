//! # Identities Subcommand
//!
//! - `list` — Identities managed by the node.
//! - `create` — Create an identity from a short subject name.
//! - `show` — DID document, discovery status and wallet of one identity.

use anyhow::Result;
use clap::{Args, Subcommand};
use nuts_admin_client::identity::IdentityDetails;
use nuts_admin_client::AdminClient;
use nuts_admin_core::Identity;

use crate::{print_json, report};

/// Arguments for the `nuts-admin identities` subcommand.
#[derive(Args, Debug)]
pub struct IdentitiesArgs {
    #[command(subcommand)]
    pub command: IdentitiesCommand,
}

/// Identities subcommands.
#[derive(Subcommand, Debug)]
pub enum IdentitiesCommand {
    /// List identities.
    List {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Create an identity.
    Create {
        /// Short name the DID is derived from.
        subject: String,
    },

    /// Show an identity.
    Show {
        /// The identity's DID.
        did: String,
    },
}

/// Execute the identities subcommand.
pub async fn run_identities(args: &IdentitiesArgs, client: &AdminClient) -> Result<u8> {
    match &args.command {
        IdentitiesCommand::List { json } => {
            let result = client.identities().list().await;
            report(client, result, |identities| {
                if *json {
                    print_json(&identities)
                } else {
                    print!("{}", table(&identities));
                    Ok(())
                }
            })
        }
        IdentitiesCommand::Create { subject } => {
            let result = client.identities().create(subject).await;
            report(client, result, |identity| {
                println!("OK: created {} ({})", identity.name, identity.did);
                Ok(())
            })
        }
        IdentitiesCommand::Show { did } => {
            let result = client.identities().get(did).await;
            report(client, result, |details: IdentityDetails| print_json(&details))
        }
    }
}

fn table(identities: &[Identity]) -> String {
    let width = identities.iter().map(|i| i.name.len()).max().unwrap_or(0);
    identities
        .iter()
        .map(|i| format!("{:<width$}  {}\n", i.name, i.did))
        .collect()
}
