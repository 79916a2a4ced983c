//! Import path rewriting.
//!
//! Upstream files import each other as `banyandb/<module>/v1/<file>.proto`.
//! The merged layout collapses every module into a single file, so those
//! references become `banyandb/v1/banyandb-<module>.proto`. Only statements
//! already classified as imports by the parser pass through here, which keeps
//! the rewrite statement-aware: comments and message bodies are never touched.

use std::str::FromStr;

use tracing::debug;

use crate::module::Module;

/// Result of rewriting one module's import statements.
#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    /// Rewritten import lines, in input order, self-imports removed.
    pub imports: Vec<String>,
    /// Quoted paths that matched the upstream module pattern but name a
    /// module outside the fixed enumeration.
    pub unresolved: Vec<String>,
}

/// Where an import path points after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ImportTarget {
    /// Upstream or already-flattened reference to an enumerated module.
    Module(Module),
    /// Well-known external path (google/*, validate/*, ...), left verbatim.
    External,
    /// banyandb-prefixed path that maps to no enumerated module.
    Unresolved,
}

/// Rewrite the import statements of one upstream file.
///
/// Pure function: imports referencing the module being merged itself are
/// dropped (they collapse into the same output file), module references are
/// rewritten to the flattened layout, everything else passes through
/// verbatim. Unresolvable banyandb-pattern paths are reported, not silently
/// kept.
pub fn rewrite_imports(imports: &[String], current: Module) -> RewriteOutcome {
    let mut outcome = RewriteOutcome::default();

    for line in imports {
        let Some((prefix, path, suffix)) = split_import_statement(line) else {
            // Not an `import "...";` statement; keep untouched.
            outcome.imports.push(line.clone());
            continue;
        };

        match classify(path) {
            ImportTarget::Module(module) if module == current => {
                debug!(module = %current, import = path, "dropping self-import");
            }
            ImportTarget::Module(module) => {
                let rewritten = format!("{}{}{}", prefix, module.merged_import_path(), suffix);
                if rewritten != *line {
                    debug!(from = path, to = %module.merged_import_path(), "rewrote import");
                }
                outcome.imports.push(rewritten);
            }
            ImportTarget::External => outcome.imports.push(line.clone()),
            ImportTarget::Unresolved => outcome.unresolved.push(path.to_string()),
        }
    }

    outcome
}

/// Split an import statement into (everything up to the opening quote, the
/// quoted path, everything from the closing quote on).
///
/// Returns `None` unless the line matches the `import "<path>";` grammar,
/// optionally with a `public`/`weak` modifier.
fn split_import_statement(line: &str) -> Option<(&str, &str, &str)> {
    let stripped = line.trim_start();
    let rest = stripped.strip_prefix("import")?;
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix("public")
        .or_else(|| rest.strip_prefix("weak"))
        .map(str::trim_start)
        .unwrap_or(rest);
    if !rest.starts_with('"') {
        return None;
    }

    let open = line.find('"')?;
    let close = open + 1 + line[open + 1..].find('"')?;
    if !line[close + 1..].trim_start().starts_with(';') {
        return None;
    }
    Some((&line[..open + 1], &line[open + 1..close], &line[close..]))
}

fn classify(path: &str) -> ImportTarget {
    let Some(rest) = path.strip_prefix("banyandb/") else {
        return ImportTarget::External;
    };

    let segments: Vec<&str> = rest.split('/').collect();
    match segments.as_slice() {
        // banyandb/<module>/v1/<file>.proto — the upstream layout.
        [name, "v1", file] if file.ends_with(".proto") => match Module::from_str(name) {
            Ok(module) => ImportTarget::Module(module),
            Err(_) => ImportTarget::Unresolved,
        },
        // banyandb/v1/banyandb-<module>.proto — already flattened.
        ["v1", file] => file
            .strip_prefix("banyandb-")
            .and_then(|f| f.strip_suffix(".proto"))
            .and_then(|name| Module::from_str(name).ok())
            .map(ImportTarget::Module)
            .unwrap_or(ImportTarget::Unresolved),
        _ => ImportTarget::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_module_import_rewritten() {
        let outcome = rewrite_imports(
            &lines(&["import \"banyandb/common/v1/common.proto\";"]),
            Module::Measure,
        );
        assert_eq!(
            outcome.imports,
            vec!["import \"banyandb/v1/banyandb-common.proto\";"]
        );
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn test_external_import_untouched() {
        let input = lines(&["import \"google/protobuf/timestamp.proto\";"]);
        let outcome = rewrite_imports(&input, Module::Measure);
        assert_eq!(outcome.imports, input);
    }

    #[test]
    fn test_self_import_dropped() {
        let outcome = rewrite_imports(
            &lines(&["import \"banyandb/measure/v1/topn.proto\";"]),
            Module::Measure,
        );
        assert!(outcome.imports.is_empty());
    }

    #[test]
    fn test_unknown_module_reported() {
        let outcome = rewrite_imports(
            &lines(&["import \"banyandb/bogus/v1/bogus.proto\";"]),
            Module::Measure,
        );
        assert!(outcome.imports.is_empty());
        assert_eq!(outcome.unresolved, vec!["banyandb/bogus/v1/bogus.proto"]);
    }

    #[test]
    fn test_already_flattened_import_stable() {
        let input = lines(&["import \"banyandb/v1/banyandb-model.proto\";"]);
        let outcome = rewrite_imports(&input, Module::Measure);
        assert_eq!(outcome.imports, input);
    }

    #[test]
    fn test_indentation_and_suffix_preserved() {
        let outcome = rewrite_imports(
            &lines(&["  import \"banyandb/model/v1/query.proto\";  // shared"]),
            Module::Measure,
        );
        assert_eq!(
            outcome.imports,
            vec!["  import \"banyandb/v1/banyandb-model.proto\";  // shared"]
        );
    }

    #[test]
    fn test_non_import_grammar_untouched() {
        // A commented-out import must not be rewritten.
        let input = lines(&["// import \"banyandb/common/v1/common.proto\";"]);
        let outcome = rewrite_imports(&input, Module::Measure);
        assert_eq!(outcome.imports, input);
    }

    #[test]
    fn test_trailing_comment_with_quotes() {
        let outcome = rewrite_imports(
            &lines(&["import \"banyandb/common/v1/common.proto\"; // \"shared\" types"]),
            Module::Measure,
        );
        assert_eq!(
            outcome.imports,
            vec!["import \"banyandb/v1/banyandb-common.proto\"; // \"shared\" types"]
        );
    }

    #[test]
    fn test_public_modifier_supported() {
        let outcome = rewrite_imports(
            &lines(&["import public \"banyandb/model/v1/common.proto\";"]),
            Module::Stream,
        );
        assert_eq!(
            outcome.imports,
            vec!["import public \"banyandb/v1/banyandb-model.proto\";"]
        );
    }
}
