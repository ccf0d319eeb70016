//! # nuts-admin-cli — Command-line front end for the Nuts admin console
//!
//! Provides the `nuts-admin` binary. Every subcommand that talks to the
//! console backend goes through [`nuts_admin_client::AdminClient`]; the
//! offline ones (`encode`, `templates`) use the pure crates directly.
//!
//! ## Subcommands
//!
//! - `nuts-admin encode` — Percent-encode a path segment.
//! - `nuts-admin templates` — List and render credential templates.
//! - `nuts-admin identities` — List, create and inspect identities.
//! - `nuts-admin credentials` — Issue, list, search and upload credentials.
//! - `nuts-admin discovery` — Discovery services and activation.
//!
//! ```bash
//! nuts-admin --url http://localhost:1305 identities list
//! nuts-admin credentials issue NutsURACredential --issuer did:web:a --subject did:web:b 12345678
//! nuts-admin discovery requirements urn:nuts.nl:usecase:eOverdrachtDev2023
//! ```

pub mod credentials;
pub mod discovery;
pub mod encode;
pub mod identities;
pub mod templates;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use nuts_admin_client::{
    handle_unauthorized, AdminClient, ApiConfig, ApiError, EnvToken, Navigator, SessionFile,
    TokenProvider,
};
use serde::Serialize;
use url::Url;

/// Environment variable consulted for a token when no session file is given.
pub const TOKEN_ENV: &str = "NUTS_ADMIN_TOKEN";

/// Exit code when the backend requires the operator to sign in.
pub const EXIT_SIGN_IN: u8 = 2;

/// Connection options shared by all online subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Console backend URL.
    #[arg(long, global = true, env = "NUTS_ADMIN_URL")]
    pub url: Option<Url>,

    /// File holding the session token. Re-read before every request.
    #[arg(long, global = true, env = "NUTS_ADMIN_SESSION_FILE")]
    pub session_file: Option<PathBuf>,
}

/// Build an admin client from environment configuration and CLI overrides.
pub fn connect(args: &ConnectionArgs) -> Result<AdminClient> {
    let mut config = ApiConfig::from_env().context("reading admin API configuration")?;
    if let Some(url) = &args.url {
        config.base_url = url.clone();
    }
    let tokens: Arc<dyn TokenProvider> = match &args.session_file {
        Some(path) => Arc::new(SessionFile::new(path)),
        None => Arc::new(EnvToken::new(TOKEN_ENV)),
    };
    tracing::debug!(base_url = %config.base_url, "connecting to admin API");
    AdminClient::new(&config, tokens).context("building admin API client")
}

/// Prints where to sign in instead of failing.
#[derive(Debug, Clone)]
pub struct SignInHint {
    base_url: Url,
}

impl SignInHint {
    pub fn new(base_url: &Url) -> Self {
        Self {
            base_url: base_url.clone(),
        }
    }

    /// Absolute sign-in location for `route`.
    pub fn target(&self, route: &str) -> String {
        self.base_url
            .join(route)
            .map(String::from)
            .unwrap_or_else(|_| route.to_string())
    }
}

impl Navigator for SignInHint {
    fn navigate(&self, target: &str) {
        eprintln!("Not signed in. Sign in at {}", self.target(target));
    }
}

/// Finish an API call: render the value, or print the sign-in hint on 401.
pub fn report<T>(
    client: &AdminClient,
    result: Result<T, ApiError>,
    render: impl FnOnce(T) -> Result<()>,
) -> Result<u8> {
    let hint = SignInHint::new(client.api().base_url());
    match handle_unauthorized(result, &hint) {
        None => Ok(EXIT_SIGN_IN),
        Some(result) => {
            render(result?)?;
            Ok(0)
        }
    }
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a `key=value` argument.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected key=value, got {raw:?}")),
    }
}
