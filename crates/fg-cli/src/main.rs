//! FocusGuard CLI
//!
//! CLI tool for checking URLs against focus sessions and inspecting the
//! always-allowed domain configuration.

mod check;
mod domains;
mod files;
mod logging;
mod remote;
mod replay;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fg-cli")]
#[command(about = "FocusGuard restriction engine tools")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the always-allowed domain list comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    /// JSON config file with `endpoints`, `path`, `timeoutMs`
    #[arg(long)]
    pub config: Option<String>,

    /// Config endpoint base URL (repeatable, tried in order)
    #[arg(long = "endpoint")]
    pub endpoints: Vec<String>,

    /// Seed the always-allowed list instead of the built-in defaults
    #[arg(long = "allow-domain")]
    pub allow_domains: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate URLs against a session file
    Check {
        /// Session JSON file
        #[arg(short, long)]
        session: String,

        /// URLs to evaluate
        #[arg(required = true)]
        urls: Vec<String>,

        /// Fetch the always-allowed list before evaluating
        #[arg(long)]
        refresh: bool,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Fetch and print the always-allowed domain list
    Domains {
        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Run a navigation event log through the guard
    Replay {
        /// Session JSON file
        #[arg(short, long)]
        session: String,

        /// JSON array of navigation events
        #[arg(short, long)]
        events: String,

        /// Fetch the always-allowed list before replaying
        #[arg(long)]
        refresh: bool,

        #[command(flatten)]
        remote: RemoteArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::initialize(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            session,
            urls,
            refresh,
            remote,
        } => check::run_check(check::CheckOptions {
            session_path: session,
            urls,
            refresh,
            remote,
        }),
        Commands::Domains { remote } => domains::run_domains(&remote),
        Commands::Replay {
            session,
            events,
            refresh,
            remote,
        } => replay::run_replay(replay::ReplayOptions {
            session_path: session,
            events_path: events,
            refresh,
            remote,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
