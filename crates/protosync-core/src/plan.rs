//! The per-run sync plan: what each module's merged file should contain,
//! and how that compares to what is on disk.
//!
//! A plan is computed once per invocation, after every fetch has succeeded,
//! and then either printed (dry run) or applied. Both modes see the same
//! computed content; they differ only in whether the write happens.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::diff::unified_diff;
use crate::error::SyncError;
use crate::merge::{merge_module, SourceFile};
use crate::module::Module;

/// One module's planned output.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub module: Module,
    /// Destination path under the consolidated directory.
    pub dest: PathBuf,
    /// The merged content this run would write.
    pub content: String,
    /// Current on-disk content, if the file exists.
    pub current: Option<String>,
}

impl PlanEntry {
    /// Whether applying this entry would change the file.
    pub fn changed(&self) -> bool {
        self.current.as_deref() != Some(self.content.as_str())
    }

    /// Unified diff of the on-disk content against the planned content.
    ///
    /// Empty when nothing would change.
    pub fn diff(&self) -> String {
        let dest = self.dest.display();
        let (old_label, old) = match &self.current {
            Some(current) => (format!("a/{}", dest), current.as_str()),
            None => ("/dev/null".to_string(), ""),
        };
        unified_diff(old, &self.content, &old_label, &format!("b/{}", dest))
    }
}

/// The full set of (module → merged file) mappings for one invocation.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub entries: Vec<PlanEntry>,
}

impl SyncPlan {
    /// Merge every requested module and compare against the on-disk files.
    ///
    /// Fails on any unresolved import before anything is written.
    pub fn build(
        fetched: &[(Module, Vec<SourceFile>)],
        config: &SyncConfig,
    ) -> Result<Self, SyncError> {
        let mut entries = Vec::with_capacity(fetched.len());
        for (module, files) in fetched {
            let content = merge_module(*module, files, config)?;
            let dest = config.output_path(*module);
            let current = match fs::read_to_string(&dest) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            };
            entries.push(PlanEntry {
                module: *module,
                dest,
                content,
                current,
            });
        }
        Ok(Self { entries })
    }

    /// Entries that would change the on-disk file.
    pub fn changed(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.changed())
    }

    pub fn has_changes(&self) -> bool {
        self.changed().next().is_some()
    }

    /// Write every changed entry, atomically per file.
    ///
    /// Each file is written to a temporary path in the destination directory
    /// and renamed into place, so a mid-run crash cannot leave a truncated
    /// proto file behind. Returns the modules that were updated.
    pub fn apply(&self, config: &SyncConfig) -> Result<Vec<Module>, SyncError> {
        fs::create_dir_all(&config.output_dir)
            .map_err(|e| SyncError::write_at(&config.output_dir, e.to_string()))?;

        let mut updated = Vec::new();
        for entry in self.entries.iter() {
            if !entry.changed() {
                debug!(module = %entry.module, "unchanged, skipping write");
                continue;
            }
            write_atomic(entry, config)?;
            info!(module = %entry.module, path = %entry.dest.display(), "wrote merged file");
            updated.push(entry.module);
        }
        Ok(updated)
    }
}

fn write_atomic(entry: &PlanEntry, config: &SyncConfig) -> Result<(), SyncError> {
    let dir = entry
        .dest
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output_dir.clone());
    let mut tmp = NamedTempFile::new_in(&dir)
        .map_err(|e| SyncError::write_at(&entry.dest, e.to_string()))?;
    tmp.write_all(entry.content.as_bytes())
        .map_err(|e| SyncError::write_at(&entry.dest, e.to_string()))?;
    tmp.persist(&entry.dest)
        .map_err(|e| SyncError::write_at(&entry.dest, e.to_string()))?;
    Ok(())
}
