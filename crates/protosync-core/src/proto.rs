//! Structural splitting of a proto file.
//!
//! The merger never needs a full proto AST; it needs the file cut into the
//! handful of sections that merge differently: license header, `syntax`,
//! `option java_package`, `package`, import statements, and everything else.
//! Skip patterns (gateway/OpenAPI annotations) are applied during the split
//! so downstream stages only ever see content that belongs in the output.

use crate::config::SkipPatterns;

/// A fetched proto file split into its merge-relevant sections.
#[derive(Debug, Clone, Default)]
pub struct ProtoFile {
    /// Leading comment block, verbatim.
    pub license: Vec<String>,
    /// The `syntax = "proto3";` line.
    pub syntax: Option<String>,
    /// The `option java_package = ...;` line.
    pub java_package: Option<String>,
    /// The `package ...;` line.
    pub package: Option<String>,
    /// `import "...";` statements, verbatim, in file order.
    pub imports: Vec<String>,
    /// Remaining body lines.
    pub body: Vec<String>,
}

/// Split `content` into sections, dropping skip-pattern matches.
pub fn parse(content: &str, skip: &SkipPatterns) -> ProtoFile {
    let lines: Vec<&str> = content.lines().collect();
    let mut result = ProtoFile::default();

    let mut license_done = false;
    let mut syntax_done = false;
    let mut package_done = false;
    let mut in_option_block = false;
    let mut brace_depth: i64 = 0;

    for (i, &line) in lines.iter().enumerate() {
        let stripped = line.trim();

        // License header: every consecutive comment line from the top.
        if !license_done {
            let is_comment = stripped.starts_with("//")
                || stripped.starts_with("/*")
                || (stripped.starts_with('*') && i > 0 && lines[i - 1].contains("/*"));
            if is_comment {
                result.license.push(line.to_string());
                continue;
            }
            license_done = true;
            if stripped.is_empty() {
                continue;
            }
        }

        // Blank gap between license and syntax.
        if !syntax_done && stripped.is_empty() {
            continue;
        }

        if !syntax_done && stripped.starts_with("syntax =") {
            result.syntax = Some(line.to_string());
            syntax_done = true;
            continue;
        }

        if stripped.starts_with("option java_package") {
            if result.java_package.is_none() {
                result.java_package = Some(line.to_string());
            }
            continue;
        }

        if matches_skip_line(stripped, skip) {
            continue;
        }

        // Multi-line option blocks need brace tracking; single-line forms
        // are dropped outright.
        if syntax_done {
            if skip.option_blocks.iter().any(|p| stripped.contains(p)) {
                brace_depth = brace_delta(stripped);
                if brace_depth > 0 {
                    in_option_block = true;
                }
                continue;
            }
            if in_option_block {
                brace_depth += brace_delta(stripped);
                if brace_depth <= 0 {
                    in_option_block = false;
                }
                continue;
            }
        }

        if !package_done && stripped.starts_with("package ") {
            result.package = Some(line.to_string());
            package_done = true;
            continue;
        }

        if stripped.starts_with("import ") {
            if !skip.import_contains.iter().any(|p| line.contains(p)) {
                result.imports.push(line.to_string());
            }
            continue;
        }

        if syntax_done && package_done && !in_option_block {
            result.body.push(line.to_string());
        }
    }

    result
}

fn matches_skip_line(stripped: &str, skip: &SkipPatterns) -> bool {
    skip.line_prefixes.iter().any(|p| stripped.starts_with(p))
        || skip.line_contains.iter().any(|p| stripped.contains(p))
}

/// Net brace count of a line, for tracking option block extent.
pub(crate) fn brace_delta(s: &str) -> i64 {
    s.matches('{').count() as i64 - s.matches('}').count() as i64
}
