use fg_core::{MemorySink, NavigationGuard, Verdict};

use crate::files;
use crate::remote;
use crate::RemoteArgs;

pub struct ReplayOptions {
    pub session_path: String,
    pub events_path: String,
    pub refresh: bool,
    pub remote: RemoteArgs,
}

pub fn run_replay(opts: ReplayOptions) -> Result<(), String> {
    let session = files::read_session(&opts.session_path)?;
    let events = files::read_events(&opts.events_path)?;
    let cache = remote::prepare_cache(&opts.remote, opts.refresh)?;

    let sink = MemorySink::new();
    let guard = NavigationGuard::new(&cache, &sink);

    println!("Replaying {} navigation event(s)", events.len());
    println!("--------------------------------------------------");

    for event in &events {
        let label = match guard.observe(event, Some(&session)) {
            Verdict::Allow => "ALLOW",
            Verdict::Block { .. } => "BLOCK",
        };
        println!("{:>15}  {:<13} {}  {}", event.timestamp_ms, format!("{:?}", event.kind), label, event.url);
    }

    let attempts = sink.attempts();
    println!();
    println!("Blocked attempts logged: {}", attempts.len());
    for attempt in &attempts {
        println!("  {}  {}", attempt.timestamp_ms, attempt.url);
    }

    Ok(())
}
