//! Session token providers.
//!
//! The client never caches the bearer token: it asks its [`TokenProvider`]
//! on every call, so a token change affects only requests issued after it.
//! An empty token counts as no token.

use std::path::PathBuf;

use zeroize::Zeroizing;

/// Source of the operator's session token.
pub trait TokenProvider: Send + Sync {
    /// The current token, or `None` when the operator has no session.
    fn token(&self) -> Option<Zeroizing<String>>;
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<Zeroizing<String>> {
        self().map(Zeroizing::new)
    }
}

/// No session: requests are sent without `Authorization`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<Zeroizing<String>> {
        None
    }
}

/// A fixed token.
///
/// Custom `Debug` implementation redacts the token.
#[derive(Clone)]
pub struct StaticToken(Zeroizing<String>);

impl StaticToken {
    /// Provider that always yields `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"[REDACTED]").finish()
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<Zeroizing<String>> {
        Some(self.0.clone())
    }
}

/// Token stored in a file, re-read on every call.
///
/// A missing or unreadable file means no session. Surrounding whitespace
/// is stripped.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Provider reading the session token from `path` on every call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenProvider for SessionFile {
    fn token(&self) -> Option<Zeroizing<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let raw = Zeroizing::new(raw);
                Some(Zeroizing::new(raw.trim().to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "cannot read session file: {e}");
                None
            }
        }
    }
}

/// Token read from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    /// Provider reading the session token from environment variable `var`.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenProvider for EnvToken {
    fn token(&self) -> Option<Zeroizing<String>> {
        std::env::var(&self.var).ok().map(Zeroizing::new)
    }
}

/// The provider's token with empty values treated as absent.
pub(crate) fn current_token(provider: &dyn TokenProvider) -> Option<Zeroizing<String>> {
    provider.token().filter(|t| !t.is_empty())
}
