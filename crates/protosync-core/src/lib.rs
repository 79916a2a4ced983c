//! Merge and import-rewrite engine for the BanyanDB proto sync tool.
//!
//! Takes the upstream `banyandb/<module>/v1/*.proto` files and produces the
//! consolidated client-facing layout: one `banyandb-<module>.proto` per
//! module under a single `v1/` directory, with every cross-module import
//! rewritten to match.
//!
//! # Modules
//!
//! - `module`: the fixed seven-module enumeration
//! - `config`: immutable per-run configuration (repo coordinates, skip
//!   patterns, exclusion lists)
//! - `proto`: structural splitting of a proto file
//! - `rewrite`: statement-aware import path rewriting
//! - `filter`: body filtering (exclusions, gateway option stripping)
//! - `merge`: multi-file merge into one consolidated file
//! - `plan`: per-run sync plan, diffing and atomic apply
//! - `diff`: unified diff rendering

pub mod config;
pub mod diff;
pub mod error;
pub mod filter;
pub mod merge;
pub mod module;
pub mod plan;
pub mod proto;
pub mod rewrite;

pub use config::{Exclusions, SkipPatterns, SyncConfig};
pub use error::SyncError;
pub use merge::{merge_module, SourceFile};
pub use module::{FileSelection, Module};
pub use plan::{PlanEntry, SyncPlan};
