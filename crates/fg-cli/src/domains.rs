use fg_remote::RefreshOutcome;

use crate::remote;
use crate::RemoteArgs;

pub fn run_domains(args: &RemoteArgs) -> Result<(), String> {
    let config = remote::load_config(args)?;
    let cache = remote::seed_cache(args);

    println!("Endpoints:");
    for url in config.endpoint_urls() {
        println!("  {}", url);
    }
    println!();

    match remote::refresh_blocking(&cache, &config)? {
        RefreshOutcome::Updated { endpoint, count } => {
            println!("Fetched {} domain(s) from {}", count, endpoint);
        }
        RefreshOutcome::Failed | RefreshOutcome::Fresh => {
            println!("All endpoints failed; showing fallback list");
        }
    }

    for domain in cache.snapshot().iter() {
        println!("  {}", domain);
    }

    Ok(())
}
