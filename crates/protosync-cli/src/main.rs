//! BanyanDB Proto Sync
//!
//! Pulls proto definitions from the upstream repository, merges each module
//! into a single consolidated file and rewrites cross-module imports.
//!
//! # Usage
//!
//! ```bash
//! proto-sync [--branch REF] [--module NAME]... [--dry-run] [--force]
//! ```
//!
//! Exit codes: 0 on success (including a clean dry run), 1 on a dry run
//! with pending changes or on any error.

use anyhow::Result;
use clap::Parser;

use protosync_cli::{run_sync, Cli, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    match run_sync(&cli, &settings).await? {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}
