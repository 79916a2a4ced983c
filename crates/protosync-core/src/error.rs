//! Error types for the sync/merge engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while merging proto files or applying a sync plan.
#[derive(Error, Debug)]
pub enum SyncError {
    /// A module name outside the fixed enumeration was requested.
    ///
    /// Raised before any network or filesystem access.
    #[error("Unknown module '{0}' (valid modules: common, database, measure, model, property, stream, trace)")]
    UnknownModule(String),

    /// An import statement matched the upstream module path pattern but
    /// could not be mapped to any enumerated module.
    ///
    /// Fatal: a dangling import would silently break downstream code
    /// generation, so the whole run aborts before any write.
    #[error("Unresolved import in module '{module}': {import}")]
    UnresolvedImport { module: String, import: String },

    /// Local filesystem failure while applying the plan.
    #[error("Write error for {path:?}: {message}")]
    Write { path: PathBuf, message: String },

    /// IO error while reading current on-disk state.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Create an unresolved-import error.
    pub fn unresolved(module: impl Into<String>, import: impl Into<String>) -> Self {
        Self::UnresolvedImport {
            module: module.into(),
            import: import.into(),
        }
    }

    /// Create a write error with path context.
    pub fn write_at(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_module_display() {
        let err = SyncError::UnknownModule("bogus".to_string());
        assert!(err.to_string().contains("Unknown module 'bogus'"));
        assert!(err.to_string().contains("measure"));
    }

    #[test]
    fn test_unresolved_import_display() {
        let err = SyncError::unresolved("measure", "banyandb/bogus/v1/bogus.proto");
        assert!(err.to_string().contains("measure"));
        assert!(err.to_string().contains("banyandb/bogus/v1/bogus.proto"));
    }

    #[test]
    fn test_write_error_display() {
        let err = SyncError::write_at("/tmp/out.proto", "disk full");
        assert!(err.to_string().contains("/tmp/out.proto"));
        assert!(err.to_string().contains("disk full"));
    }
}
