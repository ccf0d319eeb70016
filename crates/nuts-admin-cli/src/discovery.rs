//! # Discovery Subcommand
//!
//! - `list` — Discovery services known to the node.
//! - `requirements` — Credential types a service requires.
//! - `search` — Presentations registered on a service.
//! - `activate` / `deactivate` — Register or remove a subject.

use anyhow::Result;
use clap::{Args, Subcommand};
use nuts_admin_client::AdminClient;
use nuts_admin_vc::DiscoveryServiceDefinition;
use serde_json::{Map, Value};

use crate::{parse_key_value, print_json, report};

/// Arguments for the `nuts-admin discovery` subcommand.
#[derive(Args, Debug)]
pub struct DiscoveryArgs {
    #[command(subcommand)]
    pub command: DiscoveryCommand,
}

/// Discovery subcommands.
#[derive(Subcommand, Debug)]
pub enum DiscoveryCommand {
    /// List discovery services.
    List {
        /// Print full service definitions as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the credential types a service requires.
    Requirements {
        /// Service identifier.
        service: String,
    },

    /// Search presentations registered on a service.
    Search {
        /// Service identifier.
        service: String,
        /// Field filter as key=value; repeat for more.
        #[arg(long = "filter", value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
    },

    /// Register a subject on a service.
    Activate {
        /// Service identifier.
        service: String,
        /// Subject DID.
        subject: String,
        /// Registration parameter as key=value; repeat for more.
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Remove a subject from a service.
    Deactivate {
        /// Service identifier.
        service: String,
        /// Subject DID.
        subject: String,
    },
}

/// Execute the discovery subcommand.
pub async fn run_discovery(args: &DiscoveryArgs, client: &AdminClient) -> Result<u8> {
    match &args.command {
        DiscoveryCommand::List { json } => {
            let result = client.discovery().services().await;
            report(client, result, |services| {
                if *json {
                    print_json(&services)
                } else {
                    print!("{}", summary(&services));
                    Ok(())
                }
            })
        }
        DiscoveryCommand::Requirements { service } => {
            let result = client.discovery().requirements(service).await;
            report(client, result, |types| {
                for t in types {
                    println!("{t}");
                }
                Ok(())
            })
        }
        DiscoveryCommand::Search { service, filters } => {
            let result = client.discovery().search(service, filters).await;
            report(client, result, |hits| print_json(&hits))
        }
        DiscoveryCommand::Activate {
            service,
            subject,
            params,
        } => {
            let result = client
                .discovery()
                .activate(service, subject, registration_parameters(params))
                .await;
            report(client, result, |activation| {
                match activation.reason {
                    Some(reason) => println!("PENDING: {subject} on {service}: {reason}"),
                    None => println!("OK: {subject} activated on {service}"),
                }
                Ok(())
            })
        }
        DiscoveryCommand::Deactivate { service, subject } => {
            let result = client.discovery().deactivate(service, subject).await;
            report(client, result, |()| {
                println!("OK: {subject} deactivated on {service}");
                Ok(())
            })
        }
    }
}

fn registration_parameters(params: &[(String, String)]) -> Option<Map<String, Value>> {
    if params.is_empty() {
        return None;
    }
    Some(
        params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

fn summary(services: &[DiscoveryServiceDefinition]) -> String {
    services
        .iter()
        .map(|s| {
            let required: Vec<_> = s.required_credential_types().into_iter().collect();
            format!("{}\n  endpoint: {}\n  requires: {}\n", s.id, s.endpoint, required.join(", "))
        })
        .collect()
}
