//! The fixed upstream module enumeration.
//!
//! Every module name accepted by the tool must belong to this set; unknown
//! names are rejected before any network access.

use std::fmt;
use std::str::FromStr;

use crate::error::SyncError;

/// One of the seven upstream proto groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Module {
    Common,
    Database,
    Measure,
    Model,
    Property,
    Stream,
    Trace,
}

/// Which upstream files a module pulls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSelection {
    /// Fetch every `.proto` file listed in the upstream directory.
    All,
    /// Fetch exactly the named files, in this order.
    Named(&'static [&'static str]),
}

impl Module {
    /// All modules, in sync order.
    pub const ALL: [Module; 7] = [
        Module::Common,
        Module::Database,
        Module::Measure,
        Module::Model,
        Module::Property,
        Module::Stream,
        Module::Trace,
    ];

    /// The upstream directory name, e.g. `measure` for `measure/v1/*.proto`.
    pub fn name(&self) -> &'static str {
        match self {
            Module::Common => "common",
            Module::Database => "database",
            Module::Measure => "measure",
            Module::Model => "model",
            Module::Property => "property",
            Module::Stream => "stream",
            Module::Trace => "trace",
        }
    }

    /// The flattened destination filename, `banyandb-<module>.proto`.
    pub fn merged_filename(&self) -> String {
        format!("banyandb-{}.proto", self.name())
    }

    /// The import path a rewritten reference to this module uses.
    pub fn merged_import_path(&self) -> String {
        format!("banyandb/v1/{}", self.merged_filename())
    }

    /// Which upstream files this module syncs.
    ///
    /// `database` and `property` carry internal-only protos upstream that the
    /// client surface never needs, so they pin an explicit list.
    pub fn file_selection(&self) -> FileSelection {
        match self {
            Module::Database => FileSelection::Named(&["schema.proto", "rpc.proto"]),
            Module::Property => FileSelection::Named(&["property.proto", "rpc.proto"]),
            _ => FileSelection::All,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Module {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Module::Common),
            "database" => Ok(Module::Database),
            "measure" => Ok(Module::Measure),
            "model" => Ok(Module::Model),
            "property" => Ok(Module::Property),
            "stream" => Ok(Module::Stream),
            "trace" => Ok(Module::Trace),
            other => Err(SyncError::UnknownModule(other.to_string())),
        }
    }
}
