//! Tool settings.
//!
//! Builtin defaults, optionally overridden by a TOML file named on the
//! command line. The module enumeration, skip patterns and exclusion lists
//! are fixed in `protosync-core` and are not configurable.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use protosync_core::SyncConfig;

/// Settings that can be overridden from a TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Upstream GitHub repository in `owner/name` form.
    pub upstream_repo: String,
    /// Base URL for raw file content.
    pub raw_base: String,
    /// Base URL for the GitHub REST API.
    pub api_base: String,
    /// Proto tree prefix inside the upstream repository.
    pub remote_proto_path: String,
    /// Local directory the merged files are written to.
    pub output_dir: PathBuf,
    /// Default log level when RUST_LOG and --log-level are unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        let config = SyncConfig::default();
        Self {
            upstream_repo: config.upstream_repo,
            raw_base: config.raw_base,
            api_base: config.api_base,
            remote_proto_path: config.remote_proto_path,
            output_dir: config.output_dir,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings: builtin defaults, then the named file if given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings file {path}"))?;
                toml::from_str(&text)
                    .with_context(|| format!("Failed to parse settings file {path}"))
            }
        }
    }

    /// The immutable configuration handed to the fetcher and merger.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            upstream_repo: self.upstream_repo.clone(),
            raw_base: self.raw_base.clone(),
            api_base: self.api_base.clone(),
            remote_proto_path: self.remote_proto_path.clone(),
            output_dir: self.output_dir.clone(),
            ..SyncConfig::default()
        }
    }
}
