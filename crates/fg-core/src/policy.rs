//! Block Decision Policy
//!
//! Check order, first match wins:
//!
//! 1. No session, or session not active: allow
//! 2. Browser-internal scheme, or URL not absolute: allow
//! 3. Always-allowed application domain: allow
//! 4. Mode semantics against the session's URL list
//!
//! Every failure along the way resolves to "allow". The engine must never
//! leave the user stuck on a page they cannot navigate away from.

use crate::allowed::is_allowed_domain;
use crate::matcher::find_match;
use crate::message::blocked_reason;
use crate::types::{Mode, Session, Verdict};
use crate::url::{parse_url, raw_scheme};

/// Protocols that are never blocked (matched as `scheme:` prefixes).
pub const INTERNAL_SCHEMES: &[&str] = &[
    "chrome:",
    "chrome-extension:",
    "about:",
    "edge:",
    "brave:",
    "opera:",
    "vivaldi:",
    "moz-extension:",
    "file:",
    "resource:",
];

/// Check if a URL belongs to the browser itself.
///
/// The URL is parsed exactly as given. Anything that does not parse as an
/// absolute URL counts as internal.
pub fn is_internal_url(url: &str) -> bool {
    match raw_scheme(url) {
        Some(scheme) => {
            let protocol = format!("{scheme}:");
            INTERNAL_SCHEMES.iter().any(|p| protocol.starts_with(p))
        }
        None => true,
    }
}

fn is_app_domain<S: AsRef<str>>(url: &str, allowed_domains: &[S]) -> bool {
    parse_url(url)
        .map(|parsed| is_allowed_domain(&parsed.hostname, allowed_domains))
        .unwrap_or(false)
}

/// Decide whether navigation to `url` must be blocked.
///
/// `allowed_domains` is the current always-allowed list, typically
/// [`AllowedDomainCache::snapshot`](crate::AllowedDomainCache::snapshot).
pub fn should_block<S: AsRef<str>>(url: &str, session: Option<&Session>, allowed_domains: &[S]) -> bool {
    let session = match session {
        Some(session) if session.is_active() => session,
        _ => return false,
    };

    if is_internal_url(url) {
        return false;
    }

    if is_app_domain(url, allowed_domains) {
        return false;
    }

    if session.urls.is_empty() {
        return session.mode == Mode::Allowlist;
    }

    let matched = find_match(url, &session.urls);
    let block = match session.mode {
        Mode::Allowlist => matched.is_none(),
        Mode::Blocklist => matched.is_some(),
    };

    log::debug!(
        "{} {} ({} entry {:?})",
        if block { "block" } else { "allow" },
        url,
        session.mode.as_str(),
        matched.map(|idx| session.urls[idx].as_str()),
    );

    block
}

/// Like [`should_block`], with the overlay message attached to blocks.
pub fn decide<S: AsRef<str>>(url: &str, session: Option<&Session>, allowed_domains: &[S]) -> Verdict {
    match session {
        Some(session) if should_block(url, Some(session), allowed_domains) => Verdict::Block {
            reason: blocked_reason(url, session),
        },
        _ => Verdict::Allow,
    }
}
