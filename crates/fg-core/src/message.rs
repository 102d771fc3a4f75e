//! Blocked-reason messages shown on the restriction overlay.

use crate::types::{Mode, Session};
use crate::url::parse_url;

/// Explain why `url` is blocked under `session`.
///
/// Falls back to the raw URL when no hostname can be derived.
pub fn blocked_reason(url: &str, session: &Session) -> String {
    let site = parse_url(url)
        .map(|parsed| parsed.hostname)
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| url.to_string());

    match session.mode {
        Mode::Allowlist => format!("{site} is not on your allowlist for this focus session."),
        Mode::Blocklist => format!("{site} is on your blocklist for this focus session."),
    }
}
