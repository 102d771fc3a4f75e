//! URL normalization for list matching
//!
//! List entries are typed by users and frequently lack a scheme
//! (`example.com/videos`). Everything without `://` is parsed as if it
//! started with `https://` so entries and navigation targets compare on
//! equal footing.

use std::borrow::Cow;

use url::Url;

const DEFAULT_SCHEME_PREFIX: &str = "https://";
const WWW_PREFIX: &str = "www.";

// =============================================================================
// Parsed Form
// =============================================================================

/// Comparison form of a URL. Never stored; recomputed per comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Lowercased host without port
    pub hostname: String,
    /// Path, followed by `?query` when the query is non-empty
    pub pathname: String,
    /// Lowercased input including the (possibly inserted) scheme
    pub full_url: String,
}

// =============================================================================
// Parsing
// =============================================================================

/// Check whether the input carries an explicit scheme.
#[inline]
pub fn has_scheme(input: &str) -> bool {
    input.contains("://")
}

/// Prepend `https://` when the input has no scheme.
pub fn with_scheme(input: &str) -> Cow<'_, str> {
    if has_scheme(input) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("{DEFAULT_SCHEME_PREFIX}{input}"))
    }
}

/// Parse any string into its comparison form.
///
/// Returns `None` when the input is not a valid URL even after scheme
/// insertion. Callers treat `None` as "no match".
pub fn parse_url(input: &str) -> Option<ParsedUrl> {
    let full = with_scheme(input);
    let parsed = Url::parse(&full).ok()?;

    let hostname = parsed.host_str().unwrap_or("").to_ascii_lowercase();

    let mut pathname = parsed.path().to_string();
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        pathname.push('?');
        pathname.push_str(query);
    }

    Some(ParsedUrl {
        hostname,
        pathname,
        full_url: full.to_lowercase(),
    })
}

/// Parse the input exactly as given, without scheme insertion, and return
/// its scheme. `None` for anything that is not an absolute URL.
pub fn raw_scheme(input: &str) -> Option<String> {
    Url::parse(input).ok().map(|u| u.scheme().to_string())
}

// =============================================================================
// Hostname / Path Normalization
// =============================================================================

/// Lowercase and strip one leading `www.`.
pub fn normalize_hostname(hostname: &str) -> String {
    let lower = hostname.to_lowercase();
    match lower.strip_prefix(WWW_PREFIX) {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// Strip exactly one trailing `/`.
#[inline]
pub fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Check if `host` is a strict subdomain of `parent` (`host` ends with
/// `"." + parent`).
#[inline]
pub fn is_subdomain_of(host: &str, parent: &str) -> bool {
    host.len() > parent.len()
        && host.ends_with(parent)
        && host.as_bytes()[host.len() - parent.len() - 1] == b'.'
}
