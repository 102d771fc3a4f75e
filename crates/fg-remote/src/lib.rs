//! FocusGuard Remote Configuration
//!
//! Keeps an [`AllowedDomainCache`](fg_core::AllowedDomainCache) current by
//! polling the web app's config endpoint. Everything here is best effort: a
//! failed refresh is logged and leaves the cached list in place, and nothing
//! in this crate is ever on the path of a block decision.

pub mod config;
pub mod refresh;
pub mod source;

pub use config::RemoteConfig;
pub use refresh::{force_refresh, refresh_allowed_domains, spawn_refresh_task, unix_millis, RefreshOutcome};
pub use source::{DomainListResponse, DomainSource, FetchError, HttpDomainSource};
