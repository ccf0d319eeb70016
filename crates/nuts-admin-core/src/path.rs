//! # URI Path Encoding
//!
//! Credential IDs and DIDs are URIs that legitimately contain colons
//! (`did:web:example.com%3A8443:iam:1#key`). The node's router does not
//! decode `%3A` in paths, so a fully escaped colon turns into a 404.
//! [`encode_uri_path`] therefore escapes everything outside the unreserved
//! set `[A-Za-z0-9-_.~]` *except* `:`.
//!
//! Encoding works per character on its UTF-8 bytes with uppercase hex, which
//! yields the same output as `encodeURIComponent` applied to each character.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `[A-Za-z0-9-_.~:]` is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b':');

/// Percent-encode a single dynamic path segment, preserving `:`.
///
/// ```
/// use nuts_admin_core::encode_uri_path;
///
/// assert_eq!(encode_uri_path("did:web:example.com"), "did:web:example.com");
/// assert_eq!(encode_uri_path("a/b c"), "a%2Fb%20c");
/// assert_eq!(encode_uri_path(""), "");
/// ```
pub fn encode_uri_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SEGMENT).to_string()
}

/// Encode each segment with [`encode_uri_path`] and join them with `/`.
///
/// Used by the endpoint clients to compose paths such as
/// `discovery/v1/{service}/{subject}` without double-escaping.
pub fn join_path_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| encode_uri_path(s.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}
