//! List Matching
//!
//! Decides whether a navigation target matches any entry of a session's URL
//! list. Hostnames match exactly or by subdomain in either direction; entries
//! that carry a path (or a `?`) additionally require a path prefix match.

use crate::url::{is_subdomain_of, normalize_hostname, parse_url, strip_trailing_slash, ParsedUrl};

// =============================================================================
// Hostname Matching
// =============================================================================

/// Compare two already-normalized hostnames.
///
/// Subdomain matching is bidirectional: an entry that is a subdomain of the
/// target also matches (`sub.example.com` matches target `example.com`).
#[inline]
pub fn hostname_matches(target_host: &str, entry_host: &str) -> bool {
    target_host == entry_host
        || is_subdomain_of(target_host, entry_host)
        || is_subdomain_of(entry_host, target_host)
}

// =============================================================================
// Path Matching
// =============================================================================

/// Check if a list entry constrains matching to a path or query.
///
/// A bare hostname or hostname + `/` does not; a lone `?` does.
#[inline]
pub fn has_specific_path(raw_entry: &str, entry: &ParsedUrl) -> bool {
    !strip_trailing_slash(&entry.pathname).is_empty() || raw_entry.contains('?')
}

#[inline]
fn path_matches(target: &ParsedUrl, entry: &ParsedUrl) -> bool {
    let target_path = strip_trailing_slash(&target.pathname);
    let entry_path = strip_trailing_slash(&entry.pathname);
    target_path == entry_path || target_path.starts_with(entry_path)
}

// =============================================================================
// Entry / List Matching
// =============================================================================

/// Match an already-parsed target against one raw list entry.
pub fn entry_matches(target: &ParsedUrl, raw_entry: &str) -> bool {
    let entry = match parse_url(raw_entry) {
        Some(entry) => entry,
        None => return false,
    };

    let target_host = normalize_hostname(&target.hostname);
    let entry_host = normalize_hostname(&entry.hostname);
    if !hostname_matches(&target_host, &entry_host) {
        return false;
    }

    if !has_specific_path(raw_entry, &entry) {
        return true;
    }

    path_matches(target, &entry)
}

/// Index of the first list entry matching `target`.
///
/// An unparseable target matches nothing; unparseable entries are skipped.
pub fn find_match<S: AsRef<str>>(target: &str, entries: &[S]) -> Option<usize> {
    let parsed = parse_url(target)?;
    entries
        .iter()
        .position(|entry| entry_matches(&parsed, entry.as_ref()))
}

/// Check whether `target` matches any entry in the list.
#[inline]
pub fn matches_any<S: AsRef<str>>(target: &str, entries: &[S]) -> bool {
    find_match(target, entries).is_some()
}
