//! # Templates Subcommand
//!
//! Offline access to the credential template registry.
//!
//! - `list` — Registered credential types and their input fields.
//! - `render` — Render a credential document without issuing it.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use nuts_admin_vc::{CredentialDocument, FieldSpec, TemplateRegistry};
use serde::Serialize;

/// Arguments for the `nuts-admin templates` subcommand.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

/// Templates subcommands.
#[derive(Subcommand, Debug)]
pub enum TemplatesCommand {
    /// List credential types that can be issued from a template.
    List {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render a credential document from field values.
    Render {
        /// Credential type, e.g. NutsOrganizationCredential.
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
}

#[derive(Debug, Serialize)]
struct TemplateSummary<'a> {
    credential_type: &'a str,
    fields: &'a [FieldSpec],
}

/// Execute the templates subcommand.
pub fn run_templates(args: &TemplatesArgs) -> Result<u8> {
    let registry = TemplateRegistry::standard();
    match &args.command {
        TemplatesCommand::List { json } => {
            if *json {
                let summaries: Vec<_> = registry
                    .iter()
                    .map(|(name, template)| TemplateSummary {
                        credential_type: name,
                        fields: template.fields(),
                    })
                    .collect();
                crate::print_json(&summaries)?;
            } else {
                print!("{}", describe(&registry));
            }
            Ok(0)
        }
        TemplatesCommand::Render {
            credential_type,
            issuer,
            subject,
            values,
        } => {
            let document = render(&registry, credential_type, issuer, subject, values)?;
            crate::print_json(&document)?;
            Ok(0)
        }
    }
}

/// Render `credential_type` with `registry`.
pub fn render(
    registry: &TemplateRegistry,
    credential_type: &str,
    issuer: &str,
    subject: &str,
    values: &[String],
) -> Result<CredentialDocument> {
    let template = registry
        .get(credential_type)
        .with_context(|| format!("no credential template for type {credential_type}"))?;
    template
        .render(issuer, subject, values)
        .with_context(|| format!("rendering {credential_type}"))
}

fn describe(registry: &TemplateRegistry) -> String {
    let mut out = String::new();
    for (name, template) in registry.iter() {
        out.push_str(name);
        out.push('\n');
        for (i, field) in template.fields().iter().enumerate() {
            out.push_str(&format!("  {}. {} ({})\n", i + 1, field.name, field.description));
        }
    }
    out
}
