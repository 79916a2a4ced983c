//! Merging a module's upstream files into one consolidated proto file.
//!
//! Output layout, in order: license header (first file's, kept exactly once),
//! `syntax`, `option java_package`, `package`, the rewritten and deduplicated
//! import block, then each file's filtered body in upstream order. When a
//! module merges more than one upstream file, each body section is preceded
//! by a provenance comment naming its origin so diffs stay auditable.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::filter::filter_body;
use crate::module::Module;
use crate::proto::parse;
use crate::rewrite::rewrite_imports;

/// One upstream file's name and raw content, as handed over by the fetcher.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Filename under the module's upstream directory, e.g. `measure.proto`.
    pub filename: String,
    /// Raw upstream text.
    pub content: String,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Merge `files` into the consolidated content for `module`.
///
/// Pure function of its inputs; repeated runs over the same upstream revision
/// produce byte-identical output.
pub fn merge_module(
    module: Module,
    files: &[SourceFile],
    config: &SyncConfig,
) -> Result<String, SyncError> {
    if files.is_empty() {
        return Ok(String::new());
    }

    let parsed: Vec<_> = files
        .iter()
        .map(|f| parse(&f.content, &config.skip))
        .collect();

    let mut merged: Vec<String> = Vec::new();

    // Header sections come from the first file only; subsequent copies are
    // duplicates by construction upstream.
    if !parsed[0].license.is_empty() {
        merged.extend(parsed[0].license.iter().cloned());
        merged.push(String::new());
    }
    if let Some(syntax) = &parsed[0].syntax {
        merged.push(syntax.clone());
        merged.push(String::new());
    }
    if let Some(java_package) = &parsed[0].java_package {
        merged.push(java_package.clone());
        merged.push(String::new());
    }
    if let Some(package) = &parsed[0].package {
        merged.push(package.clone());
        merged.push(String::new());
    }

    // Union of all files' imports, rewritten to the flattened layout.
    let mut imports: BTreeSet<String> = BTreeSet::new();
    for file in &parsed {
        let outcome = rewrite_imports(&file.imports, module);
        if let Some(unresolved) = outcome.unresolved.first() {
            return Err(SyncError::unresolved(module.name(), unresolved));
        }
        imports.extend(outcome.imports.into_iter().map(|l| l.trim().to_string()));
    }
    if !imports.is_empty() {
        let mut sorted: Vec<String> = imports.into_iter().collect();
        sorted.sort_by_key(|line| (import_rank(line), line.clone()));
        merged.extend(sorted);
        merged.push(String::new());
    }

    let multi_file = files.len() > 1;
    let mut first_body = true;
    for (file, parsed) in files.iter().zip(&parsed) {
        let body = filter_body(
            parsed.body.clone(),
            config.exclusions(module),
            &config.skip,
        );
        if body.is_empty() {
            continue;
        }
        if !first_body {
            merged.push(String::new());
        }
        if multi_file {
            merged.push(format!(
                "// Source: banyandb/{}/v1/{}",
                module.name(),
                file.filename
            ));
        }
        merged.extend(body);
        first_body = false;
    }

    while merged.last().is_some_and(|l| l.trim().is_empty()) {
        merged.pop();
    }

    debug!(module = %module, files = files.len(), lines = merged.len(), "merged module");
    Ok(merged.join("\n") + "\n")
}

/// Import ordering: google well-knowns first, then validate, then the rest.
fn import_rank(line: &str) -> u8 {
    if line.contains("google/") {
        0
    } else if line.contains("validate/") {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LICENSE: &str = "// Licensed to the Apache Software Foundation (ASF) under one\n// or more contributor license agreements.\n";

    fn measure_proto() -> SourceFile {
        SourceFile::new(
            "measure.proto",
            format!(
                "{LICENSE}\nsyntax = \"proto3\";\n\noption java_package = \"org.apache.skywalking.banyandb.measure.v1\";\n\npackage banyandb.measure.v1;\n\nimport \"google/protobuf/timestamp.proto\";\nimport \"banyandb/common/v1/common.proto\";\n\nmessage DataPoint {{\n  string name = 1;\n}}\n"
            ),
        )
    }

    fn topn_proto() -> SourceFile {
        SourceFile::new(
            "topn.proto",
            format!(
                "{LICENSE}\nsyntax = \"proto3\";\n\noption java_package = \"org.apache.skywalking.banyandb.measure.v1\";\n\npackage banyandb.measure.v1;\n\nimport \"banyandb/common/v1/common.proto\";\nimport \"banyandb/model/v1/query.proto\";\nimport \"banyandb/measure/v1/measure.proto\";\n\nmessage TopNList {{\n  string metric = 1;\n}}\n"
            ),
        )
    }

    #[test]
    fn test_concrete_rewrite_scenario() {
        let config = SyncConfig::default();
        let merged = merge_module(Module::Measure, &[measure_proto()], &config).unwrap();
        assert!(merged.contains("import \"banyandb/v1/banyandb-common.proto\";"));
        assert!(merged.contains("import \"google/protobuf/timestamp.proto\";"));
        assert!(!merged.contains("banyandb/common/v1/common.proto"));
    }

    #[test]
    fn test_license_kept_once() {
        let config = SyncConfig::default();
        let merged =
            merge_module(Module::Measure, &[measure_proto(), topn_proto()], &config).unwrap();
        assert_eq!(merged.matches("Licensed to the Apache").count(), 1);
        assert_eq!(merged.matches("syntax = \"proto3\";").count(), 1);
        assert_eq!(merged.matches("package banyandb.measure.v1;").count(), 1);
    }

    #[test]
    fn test_imports_deduplicated_and_sorted() {
        let config = SyncConfig::default();
        let merged =
            merge_module(Module::Measure, &[measure_proto(), topn_proto()], &config).unwrap();
        // common.proto imported by both files appears once.
        assert_eq!(
            merged
                .matches("import \"banyandb/v1/banyandb-common.proto\";")
                .count(),
            1
        );
        // google imports sort ahead of banyandb imports.
        let google = merged.find("google/protobuf/timestamp").unwrap();
        let banyandb = merged.find("banyandb/v1/banyandb-common").unwrap();
        assert!(google < banyandb);
    }

    #[test]
    fn test_self_import_dropped_in_merge() {
        let config = SyncConfig::default();
        let merged =
            merge_module(Module::Measure, &[measure_proto(), topn_proto()], &config).unwrap();
        assert!(!merged.contains("banyandb/v1/banyandb-measure.proto"));
    }

    #[test]
    fn test_provenance_comments_on_multi_file_merge() {
        let config = SyncConfig::default();
        let merged =
            merge_module(Module::Measure, &[measure_proto(), topn_proto()], &config).unwrap();
        assert!(merged.contains("// Source: banyandb/measure/v1/measure.proto"));
        assert!(merged.contains("// Source: banyandb/measure/v1/topn.proto"));

        // Single-file modules stay clean.
        let single = merge_module(Module::Measure, &[measure_proto()], &config).unwrap();
        assert!(!single.contains("// Source:"));
    }

    #[test]
    fn test_unresolved_import_aborts_merge() {
        let config = SyncConfig::default();
        let file = SourceFile::new(
            "measure.proto",
            "syntax = \"proto3\";\n\npackage banyandb.measure.v1;\n\nimport \"banyandb/bogus/v1/bogus.proto\";\n\nmessage M {}\n",
        );
        let err = merge_module(Module::Measure, &[file], &config).unwrap_err();
        assert!(matches!(err, SyncError::UnresolvedImport { .. }));
        assert!(err.to_string().contains("banyandb/bogus/v1/bogus.proto"));
    }

    #[test]
    fn test_merge_is_deterministic() {
        let config = SyncConfig::default();
        let files = [measure_proto(), topn_proto()];
        let a = merge_module(Module::Measure, &files, &config).unwrap();
        let b = merge_module(Module::Measure, &files, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_ends_with_single_newline() {
        let config = SyncConfig::default();
        let merged = merge_module(Module::Measure, &[measure_proto()], &config).unwrap();
        assert!(merged.ends_with('\n'));
        assert!(!merged.ends_with("\n\n"));
    }

    #[test]
    fn test_exclusions_applied_during_merge() {
        let config = SyncConfig::default();
        let file = SourceFile::new(
            "write.proto",
            format!(
                "{LICENSE}\nsyntax = \"proto3\";\n\npackage banyandb.measure.v1;\n\nmessage WriteRequest {{\n  string metadata = 1;\n}}\n\nmessage InternalWriteRequest {{\n  uint32 shard_id = 1;\n}}\n"
            ),
        );
        let merged = merge_module(Module::Measure, &[file], &config).unwrap();
        assert!(merged.contains("message WriteRequest"));
        assert!(!merged.contains("InternalWriteRequest"));
    }
}
