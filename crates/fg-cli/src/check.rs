use fg_core::{decide, Verdict};

use crate::files;
use crate::remote;
use crate::RemoteArgs;

pub struct CheckOptions {
    pub session_path: String,
    pub urls: Vec<String>,
    pub refresh: bool,
    pub remote: RemoteArgs,
}

pub fn run_check(opts: CheckOptions) -> Result<(), String> {
    let session = files::read_session(&opts.session_path)?;
    let cache = remote::prepare_cache(&opts.remote, opts.refresh)?;
    let allowed = cache.snapshot();

    println!(
        "Session: {} mode, {} entries, {:?}",
        session.mode.as_str(),
        session.urls.len(),
        session.status
    );
    if !session.is_active() {
        println!("  Session is not active; nothing is blocked");
    }
    println!();

    let mut blocked = 0usize;
    for url in &opts.urls {
        match decide(url, Some(&session), &allowed[..]) {
            Verdict::Allow => println!("ALLOW  {}", url),
            Verdict::Block { reason } => {
                blocked += 1;
                println!("BLOCK  {}", url);
                println!("       {}", reason);
            }
        }
    }

    println!();
    println!("{} of {} URL(s) blocked", blocked, opts.urls.len());

    Ok(())
}
