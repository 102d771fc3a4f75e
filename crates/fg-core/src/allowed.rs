//! Always-allowed application domains
//!
//! The FocusGuard web app must stay reachable during every session so the
//! user can stop or adjust it. The list normally comes from a remote config
//! endpoint; this module only holds it. A new cache starts from
//! [`DEFAULT_ALLOWED_DOMAINS`], so lookups always have a usable list.
//!
//! Time is passed in as milliseconds from the caller's clock (`Date.now()`
//! under wasm, `SystemTime` natively) rather than read here.

use std::sync::{Arc, PoisonError, RwLock};

use crate::url::{is_subdomain_of, normalize_hostname};

/// Hardcoded list used until the first successful fetch.
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &["localhost", "127.0.0.1", "focusguard.app"];

/// Cool-down between refresh attempts (5 minutes).
pub const REFRESH_INTERVAL_MS: u64 = 5 * 60 * 1000;

/// Config endpoint base URLs, tried in order.
pub const DEFAULT_CONFIG_ENDPOINTS: &[&str] = &["https://focusguard.app", "http://localhost:3000"];

/// Path serving `{"domains": [...]}` under every endpoint.
pub const DEFAULT_CONFIG_PATH: &str = "/api/config/allowed-domains";

/// Full URLs to query, in order. Blank bases are skipped and the slash
/// between base and path appears exactly once.
pub fn endpoint_urls<S: AsRef<str>>(endpoints: &[S], path: &str) -> Vec<String> {
    let path = path.trim_start_matches('/');
    endpoints
        .iter()
        .map(|base| base.as_ref().trim())
        .filter(|base| !base.is_empty())
        .map(|base| format!("{}/{}", base.trim_end_matches('/'), path))
        .collect()
}

// =============================================================================
// Domain Matching
// =============================================================================

/// Check if `hostname` equals or is a subdomain of any entry.
///
/// Both sides are trimmed, lowercased and `www.`-stripped before comparing,
/// so raw entries from any source behave like cached ones. Unlike session
/// list matching, this is one-directional.
pub fn is_allowed_domain<S: AsRef<str>>(hostname: &str, domains: &[S]) -> bool {
    if hostname.is_empty() {
        return false;
    }
    let host = normalize_hostname(hostname);
    domains.iter().any(|domain| {
        let domain = normalize_hostname(domain.as_ref().trim());
        !domain.is_empty() && (host == domain || is_subdomain_of(&host, &domain))
    })
}

fn normalize_domains<I, S>(domains: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for domain in domains {
        let domain = normalize_hostname(domain.as_ref().trim());
        if !domain.is_empty() && !out.contains(&domain) {
            out.push(domain);
        }
    }
    out
}

// =============================================================================
// Cache
// =============================================================================

#[derive(Debug)]
struct CacheState {
    domains: Arc<[String]>,
    /// Last successful replacement
    fetched_at_ms: Option<u64>,
    /// Last refresh attempt, successful or not
    attempted_at_ms: Option<u64>,
}

/// Shared holder for the always-allowed domain list.
///
/// Readers take a cheap [`Arc`] snapshot; writers swap the whole list, so a
/// racing refresh can only ever leave one complete list in place.
#[derive(Debug)]
pub struct AllowedDomainCache {
    state: RwLock<CacheState>,
}

impl Default for AllowedDomainCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AllowedDomainCache {
    /// Create a cache seeded with [`DEFAULT_ALLOWED_DOMAINS`].
    pub fn new() -> Self {
        Self::with_domains(DEFAULT_ALLOWED_DOMAINS.iter().copied())
    }

    /// Create a cache seeded with a custom list. The seed counts as never
    /// fetched. An empty seed falls back to the defaults.
    pub fn with_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seed = normalize_domains(domains);
        if seed.is_empty() {
            seed = normalize_domains(DEFAULT_ALLOWED_DOMAINS.iter().copied());
        }
        Self {
            state: RwLock::new(CacheState {
                domains: seed.into(),
                fetched_at_ms: None,
                attempted_at_ms: None,
            }),
        }
    }

    /// Current list.
    pub fn snapshot(&self) -> Arc<[String]> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&state.domains)
    }

    /// Time of the last successful replacement, if any.
    pub fn fetched_at_ms(&self) -> Option<u64> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).fetched_at_ms
    }

    /// Whether the cool-down since the last attempt has elapsed.
    pub fn needs_refresh(&self, now_ms: u64) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match state.attempted_at_ms {
            None => true,
            Some(at) => now_ms.saturating_sub(at) >= REFRESH_INTERVAL_MS,
        }
    }

    /// Replace the list with freshly fetched domains.
    ///
    /// Returns `false` (and keeps the previous list) if nothing usable remains
    /// after normalization.
    pub fn replace<I, S>(&self, domains: I, now_ms: u64) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let next = normalize_domains(domains);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.attempted_at_ms = Some(now_ms);
        if next.is_empty() {
            log::warn!("Ignoring empty always-allowed domain list");
            return false;
        }
        log::debug!("Always-allowed domains updated: {} entries", next.len());
        state.domains = next.into();
        state.fetched_at_ms = Some(now_ms);
        true
    }

    /// Record a refresh attempt that produced nothing, starting the cool-down
    /// without touching the list.
    pub fn record_failed_attempt(&self, now_ms: u64) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.attempted_at_ms = Some(now_ms);
    }

    /// Check a hostname against the current list.
    pub fn is_allowed(&self, hostname: &str) -> bool {
        is_allowed_domain(hostname, &self.snapshot()[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cache = AllowedDomainCache::new();
        assert!(cache.is_allowed("localhost"));
        assert!(cache.is_allowed("focusguard.app"));
        assert!(cache.is_allowed("www.focusguard.app"));
        assert!(cache.is_allowed("staging.focusguard.app"));
        assert!(!cache.is_allowed("youtube.com"));
        assert_eq!(cache.fetched_at_ms(), None);
    }

    #[test]
    fn test_default_endpoint_urls() {
        assert_eq!(
            endpoint_urls(DEFAULT_CONFIG_ENDPOINTS, DEFAULT_CONFIG_PATH),
            vec![
                "https://focusguard.app/api/config/allowed-domains".to_string(),
                "http://localhost:3000/api/config/allowed-domains".to_string(),
            ]
        );
        assert_eq!(endpoint_urls(&["https://a.dev/", " "], "domains"), vec!["https://a.dev/domains".to_string()]);
    }

    #[test]
    fn test_one_directional_subdomain() {
        let domains = ["app.focusguard.app"];
        assert!(is_allowed_domain("app.focusguard.app", &domains));
        assert!(!is_allowed_domain("focusguard.app", &domains));
    }

    #[test]
    fn test_raw_entries_are_normalized() {
        let domains = [" WWW.FocusGuard.app ", ""];
        assert!(is_allowed_domain("focusguard.app", &domains));
        assert!(is_allowed_domain("www.focusguard.app", &domains));
        assert!(is_allowed_domain("staging.focusguard.app", &domains));
        assert!(!is_allowed_domain("example.com", &domains));
        assert!(!is_allowed_domain("trailing.", &[""]));
    }

    #[test]
    fn test_empty_hostname_is_never_allowed() {
        assert!(!is_allowed_domain("", &["localhost"]));
    }

    #[test]
    fn test_replace_normalizes() {
        let cache = AllowedDomainCache::new();
        assert!(cache.replace([" WWW.Example.com ", "", "example.com", "other.io"], 10));
        assert_eq!(&*cache.snapshot(), &["example.com".to_string(), "other.io".to_string()]);
        assert_eq!(cache.fetched_at_ms(), Some(10));
        assert!(!cache.is_allowed("localhost"));
    }

    #[test]
    fn test_replace_rejects_empty_list() {
        let cache = AllowedDomainCache::new();
        let before = cache.snapshot();
        assert!(!cache.replace(Vec::<String>::new(), 10));
        assert_eq!(cache.snapshot(), before);
        assert_eq!(cache.fetched_at_ms(), None);
        assert!(!cache.needs_refresh(10));
    }

    #[test]
    fn test_refresh_cool_down() {
        let cache = AllowedDomainCache::new();
        assert!(cache.needs_refresh(0));
        cache.replace(["focusguard.app"], 1_000);
        assert!(!cache.needs_refresh(1_000));
        assert!(!cache.needs_refresh(1_000 + REFRESH_INTERVAL_MS - 1));
        assert!(cache.needs_refresh(1_000 + REFRESH_INTERVAL_MS));
    }

    #[test]
    fn test_failed_attempt_starts_cool_down() {
        let cache = AllowedDomainCache::new();
        cache.record_failed_attempt(500);
        assert!(!cache.needs_refresh(600));
        assert!(cache.is_allowed("localhost"));
        assert_eq!(cache.fetched_at_ms(), None);
    }

    #[test]
    fn test_clock_going_backwards_does_not_refresh() {
        let cache = AllowedDomainCache::new();
        cache.replace(["focusguard.app"], 10_000);
        assert!(!cache.needs_refresh(5_000));
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let cache = AllowedDomainCache::with_domains(["a.com"]);
        let old = cache.snapshot();
        cache.replace(["b.com"], 1);
        assert_eq!(&*old, &["a.com".to_string()]);
        assert_eq!(&*cache.snapshot(), &["b.com".to_string()]);
    }

    #[test]
    fn test_concurrent_replace_leaves_complete_list() {
        let cache = std::sync::Arc::new(AllowedDomainCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = std::sync::Arc::clone(&cache);
                std::thread::spawn(move || {
                    let list = vec![format!("site{i}.com"), format!("app{i}.com")];
                    cache.replace(list, i);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let list = cache.snapshot();
        assert_eq!(list.len(), 2);
        let suffix = list[0].trim_start_matches("site");
        assert_eq!(list[1], format!("app{suffix}"));
    }
}
