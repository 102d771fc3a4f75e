//! FocusGuard Core Library
//!
//! This crate provides the URL restriction engine used by FocusGuard focus
//! sessions. Given a navigation URL and the current session descriptor it
//! decides whether the navigation must be blocked.
//!
//! # Architecture
//!
//! The engine is a pure function of `(url, session)` plus a read-only view of
//! the always-allowed application domains. It holds no state of its own; the
//! domain list lives in an [`AllowedDomainCache`] owned by whichever process
//! hosts the engine and is refreshed out of band (see the `fg-remote` crate).
//!
//! # Modules
//!
//! - `url`: scheme-tolerant URL normalization
//! - `matcher`: hostname/subdomain/path list matching
//! - `policy`: the block decision (internal schemes, app domains, mode)
//! - `message`: human-readable blocked reasons
//! - `allowed`: always-allowed domain cache and config endpoint defaults
//! - `guard`: navigation observer that feeds events through the policy
//! - `types`: session descriptor and verdict types

pub mod allowed;
pub mod guard;
pub mod matcher;
pub mod message;
pub mod policy;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use allowed::{
    endpoint_urls, AllowedDomainCache, DEFAULT_ALLOWED_DOMAINS, DEFAULT_CONFIG_ENDPOINTS, DEFAULT_CONFIG_PATH,
    REFRESH_INTERVAL_MS,
};
pub use guard::{AttemptSink, BlockedAttempt, MemorySink, NavigationEvent, NavigationGuard, NavigationKind, NoopSink};
pub use matcher::{find_match, matches_any};
pub use message::blocked_reason;
pub use policy::{decide, is_internal_url, should_block};
pub use types::{Mode, Session, SessionError, SessionStatus, Verdict};
pub use crate::url::{normalize_hostname, parse_url, ParsedUrl};
