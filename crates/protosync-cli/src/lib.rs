//! CLI crate for the BanyanDB proto sync tool.
//!
//! # Modules
//!
//! - `cli`: command-line argument parsing with clap
//! - `commands`: the sync command itself
//! - `settings`: builtin defaults plus optional TOML overrides

pub mod cli;
pub mod commands;
pub mod settings;

pub use cli::Cli;
pub use commands::{render_summary, resolve_modules, run_sync};
pub use settings::Settings;
