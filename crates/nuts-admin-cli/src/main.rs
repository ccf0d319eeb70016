//! # nuts-admin CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nuts_admin_cli::credentials::{run_credentials, CredentialsArgs};
use nuts_admin_cli::discovery::{run_discovery, DiscoveryArgs};
use nuts_admin_cli::encode::{run_encode, EncodeArgs};
use nuts_admin_cli::identities::{run_identities, IdentitiesArgs};
use nuts_admin_cli::templates::{run_templates, TemplatesArgs};
use nuts_admin_cli::{connect, ConnectionArgs};

/// Nuts admin console CLI.
///
/// Manages identities on a Nuts node through the admin console backend,
/// issues credentials from templates, loads credentials into wallets and
/// activates discovery services.
#[derive(Parser, Debug)]
#[command(name = "nuts-admin", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Percent-encode values for use as URL path segments.
    Encode(EncodeArgs),

    /// List and render credential templates.
    Templates(TemplatesArgs),

    /// List, create and inspect identities.
    Identities(IdentitiesArgs),

    /// Issue, list, search and upload credentials.
    Credentials(CredentialsArgs),

    /// Discovery services: list, requirements, search, activation.
    Discovery(DiscoveryArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Encode(args) => run_encode(args),
        Commands::Templates(args) => run_templates(args),
        Commands::Identities(args) => match connect(&cli.connection) {
            Ok(client) => run_identities(args, &client).await,
            Err(e) => Err(e),
        },
        Commands::Credentials(args) => match connect(&cli.connection) {
            Ok(client) => run_credentials(args, &client).await,
            Err(e) => Err(e),
        },
        Commands::Discovery(args) => match connect(&cli.connection) {
            Ok(client) => run_discovery(args, &client).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
