use fg_core::AllowedDomainCache;
use fg_remote::{force_refresh, unix_millis, HttpDomainSource, RefreshOutcome, RemoteConfig};

use crate::files;
use crate::RemoteArgs;

/// Config file (or environment/defaults), then `--endpoint` overrides.
pub fn load_config(args: &RemoteArgs) -> Result<RemoteConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = files::read_text(path)?;
            RemoteConfig::from_json(&text).map_err(|e| format!("Invalid config '{}': {}", path, e))?
        }
        None => RemoteConfig::from_env(),
    };

    if !args.endpoints.is_empty() {
        config.endpoints = args.endpoints.clone();
    }

    Ok(config)
}

pub fn seed_cache(args: &RemoteArgs) -> AllowedDomainCache {
    if args.allow_domains.is_empty() {
        AllowedDomainCache::new()
    } else {
        AllowedDomainCache::with_domains(&args.allow_domains)
    }
}

/// Fetch into `cache` once, blocking on a private runtime.
pub fn refresh_blocking(cache: &AllowedDomainCache, config: &RemoteConfig) -> Result<RefreshOutcome, String> {
    let source = HttpDomainSource::new(config.timeout())
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start tokio runtime: {}", e))?;
    Ok(runtime.block_on(force_refresh(cache, &source, config, unix_millis())))
}

/// Build the cache the commands evaluate against.
pub fn prepare_cache(args: &RemoteArgs, refresh: bool) -> Result<AllowedDomainCache, String> {
    let cache = seed_cache(args);
    if refresh {
        let config = load_config(args)?;
        if refresh_blocking(&cache, &config)? == RefreshOutcome::Failed {
            eprintln!("Warning: could not refresh always-allowed domains; using cached list");
        }
    }
    Ok(cache)
}
