//! The sync command.
//!
//! Control flow: validate module names, fetch everything, build the plan,
//! then either report (dry run) or apply. All fetches complete before any
//! file is written; a failure anywhere aborts the whole run.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use protosync_core::{Module, SourceFile, SyncConfig, SyncError, SyncPlan};
use protosync_fetch::{GithubFetcher, UpstreamFile};

use crate::cli::Cli;
use crate::settings::Settings;

/// Resolve requested module names against the fixed enumeration.
///
/// An empty request means all modules. Names are validated before any
/// network access; duplicates collapse and canonical sync order is kept.
pub fn resolve_modules(names: &[String]) -> Result<Vec<Module>, SyncError> {
    if names.is_empty() {
        return Ok(Module::ALL.to_vec());
    }
    let mut requested = Vec::with_capacity(names.len());
    for name in names {
        requested.push(name.parse::<Module>()?);
    }
    Ok(Module::ALL
        .into_iter()
        .filter(|m| requested.contains(m))
        .collect())
}

/// Run one sync invocation. Returns the process exit code.
pub async fn run_sync(cli: &Cli, settings: &Settings) -> Result<i32> {
    // Fail fast on bad module names, before any I/O.
    let modules = resolve_modules(&cli.modules)?;
    let config = settings.sync_config();

    print_header(cli, &config, &modules);

    if !cli.force && !cli.dry_run && !confirm()? {
        println!("Cancelled.");
        return Ok(0);
    }

    let fetcher = GithubFetcher::new(config.clone())?;
    let fetched = fetcher
        .fetch_all(&cli.branch, &modules)
        .await
        .context("Fetching upstream proto files failed")?;
    info!(
        modules = modules.len(),
        files = fetched.iter().map(|(_, f)| f.len()).sum::<usize>(),
        "all fetches complete"
    );

    let sources: Vec<(Module, Vec<SourceFile>)> = fetched
        .iter()
        .map(|(module, files)| {
            (*module, files.iter().map(UpstreamFile::to_source).collect())
        })
        .collect();
    let plan = SyncPlan::build(&sources, &config)?;

    if cli.dry_run {
        for entry in plan.changed() {
            print!("{}", entry.diff());
            println!();
        }
        print!("{}", render_summary(&plan, true));
        // Like `git diff --exit-code`: non-zero when changes are pending.
        return Ok(if plan.has_changes() { 1 } else { 0 });
    }

    plan.apply(&config)?;
    print!("{}", render_summary(&plan, false));
    Ok(0)
}

fn print_header(cli: &Cli, config: &SyncConfig, modules: &[Module]) {
    let names: Vec<&str> = modules.iter().map(|m| m.name()).collect();
    println!("=== Proto File Sync ===");
    println!("Repository: {}", config.upstream_repo);
    println!("Branch:     {}", cli.branch);
    println!("Modules:    {}", names.join(", "));
    println!("Mode:       {}", if cli.dry_run { "dry run" } else { "apply" });
    println!();
}

/// Interactive confirmation before writing.
fn confirm() -> Result<bool> {
    print!("Proceed with sync? [y/N]: ");
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().lock().read_line(&mut response)?;
    let response = response.trim().to_ascii_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Per-module CHANGED/UNCHANGED table plus a one-line total.
pub fn render_summary(plan: &SyncPlan, dry_run: bool) -> String {
    let mut out = String::from("=== Summary ===\n");
    for entry in &plan.entries {
        let status = if entry.changed() { "CHANGED" } else { "UNCHANGED" };
        out.push_str(&format!("  {}: {}\n", entry.module, status));
    }
    let count = plan.changed().count();
    if dry_run {
        out.push_str(&format!(
            "Dry run complete. {count} file(s) would be updated.\n"
        ));
    } else {
        out.push_str(&format!("Sync complete. {count} file(s) updated.\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_means_all_modules() {
        let modules = resolve_modules(&[]).unwrap();
        assert_eq!(modules, Module::ALL.to_vec());
    }

    #[test]
    fn test_single_module() {
        let modules = resolve_modules(&["measure".to_string()]).unwrap();
        assert_eq!(modules, vec![Module::Measure]);
    }

    #[test]
    fn test_order_and_duplicates_normalized() {
        let names = vec![
            "stream".to_string(),
            "common".to_string(),
            "stream".to_string(),
        ];
        let modules = resolve_modules(&names).unwrap();
        assert_eq!(modules, vec![Module::Common, Module::Stream]);
    }

    #[test]
    fn test_unknown_module_rejected() {
        let err = resolve_modules(&["bogus".to_string()]).unwrap_err();
        assert!(matches!(err, SyncError::UnknownModule(name) if name == "bogus"));
    }
}
