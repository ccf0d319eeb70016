//! Boundary adapter for the sign-in redirect.
//!
//! The client reports a 401 as [`ApiError::Unauthorized`] and never
//! navigates. Front ends call [`handle_unauthorized`] once, at the outermost
//! layer, with whatever [`Navigator`] fits (a router, a printed hint).

use crate::error::ApiError;

/// Something that can send the operator to another route.
pub trait Navigator {
    /// Navigate to `target`.
    fn navigate(&self, target: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, target: &str) {
        self(target)
    }
}

/// Perform the navigation side effect of an `Unauthorized` error.
///
/// Returns `None` when the navigator was invoked, and hands any other
/// outcome back unchanged.
pub fn handle_unauthorized<T>(
    result: Result<T, ApiError>,
    navigator: &dyn Navigator,
) -> Option<Result<T, ApiError>> {
    match result {
        Err(ApiError::Unauthorized { redirect_to, .. }) => {
            navigator.navigate(&redirect_to);
            None
        }
        other => Some(other),
    }
}
