//! CLI argument parsing for the proto sync tool.

use clap::Parser;

/// BanyanDB Proto Sync
///
/// Pulls proto definitions from the upstream Apache SkyWalking BanyanDB
/// repository and merges them into the consolidated client-facing layout.
#[derive(Parser, Debug)]
#[command(name = "proto-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Branch, tag or commit to sync from
    #[arg(long, default_value = "main")]
    pub branch: String,

    /// Sync only the named module(s); may be given multiple times
    #[arg(short, long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Preview changes without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Apply without the interactive confirmation prompt
    #[arg(long)]
    pub force: bool,

    /// Path to a TOML settings file (overrides builtin defaults)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}
