//! Best-effort refresh of the always-allowed domain cache.
//!
//! Endpoints are tried in order and the first usable answer wins. When all
//! of them fail the cache keeps whatever it had (the hardcoded defaults on
//! first run) and the cool-down still starts, so a dead endpoint is not
//! hammered on every navigation.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fg_core::AllowedDomainCache;
use tokio::task::JoinHandle;

use crate::config::RemoteConfig;
use crate::source::{DomainSource, FetchError};

/// Shortest period [`spawn_refresh_task`] will tick at.
const MIN_REFRESH_PERIOD: Duration = Duration::from_millis(1);

/// Result of one refresh call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Cool-down has not elapsed; nothing was fetched
    Fresh,
    /// Cache replaced from `endpoint`
    Updated { endpoint: String, count: usize },
    /// Every endpoint failed; cache untouched
    Failed,
}

/// Milliseconds since the Unix epoch, the clock the cache expects.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Refresh the cache if its cool-down has elapsed.
pub async fn refresh_allowed_domains<D: DomainSource>(
    cache: &AllowedDomainCache,
    source: &D,
    config: &RemoteConfig,
    now_ms: u64,
) -> RefreshOutcome {
    if !cache.needs_refresh(now_ms) {
        return RefreshOutcome::Fresh;
    }
    force_refresh(cache, source, config, now_ms).await
}

/// Refresh the cache regardless of the cool-down.
pub async fn force_refresh<D: DomainSource>(
    cache: &AllowedDomainCache,
    source: &D,
    config: &RemoteConfig,
    now_ms: u64,
) -> RefreshOutcome {
    let urls = config.endpoint_urls();
    if urls.is_empty() {
        log::warn!("{}", FetchError::NoEndpoints);
        cache.record_failed_attempt(now_ms);
        return RefreshOutcome::Failed;
    }

    for url in urls {
        match source.fetch_domains(&url).await {
            Ok(domains) => {
                if cache.replace(&domains, now_ms) {
                    let count = cache.snapshot().len();
                    log::info!("Loaded {} always-allowed domains from {}", count, url);
                    return RefreshOutcome::Updated { endpoint: url, count };
                }
                log::warn!("{} returned no usable domains", url);
            }
            Err(e) => log::warn!("Failed to fetch always-allowed domains from {}: {}", url, e),
        }
    }

    cache.record_failed_attempt(now_ms);
    log::warn!(
        "All config endpoints failed; keeping {} cached always-allowed domains",
        cache.snapshot().len()
    );
    RefreshOutcome::Failed
}

/// Poll for updates every `every` until the returned task is aborted.
///
/// Periods shorter than a millisecond are raised to one; the cool-down still
/// limits how often the endpoints are actually queried.
pub fn spawn_refresh_task<D>(
    cache: Arc<AllowedDomainCache>,
    source: D,
    config: RemoteConfig,
    every: Duration,
) -> JoinHandle<()>
where
    D: DomainSource + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every.max(MIN_REFRESH_PERIOD));
        loop {
            ticker.tick().await;
            let outcome = refresh_allowed_domains(&cache, &source, &config, unix_millis()).await;
            log::debug!("Background refresh: {:?}", outcome);
        }
    })
}
