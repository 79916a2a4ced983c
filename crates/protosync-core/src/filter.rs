//! Body filtering for merged output.
//!
//! Three passes run over each file's body before concatenation:
//! - whole-definition removal of excluded messages and RPCs,
//! - removal of `option (google.api.http)` lines inside RPC blocks,
//! - collapsing of RPC blocks left empty by the previous pass.

use crate::config::{Exclusions, SkipPatterns};
use crate::proto::brace_delta;

/// Apply all body filters for one file, in order.
pub fn filter_body(body: Vec<String>, exclusions: Exclusions, skip: &SkipPatterns) -> Vec<String> {
    let mut lines = trim_blank_edges(body);
    lines.retain(|line| {
        let stripped = line.trim();
        !skip.line_prefixes.iter().any(|p| stripped.starts_with(p))
            && !skip.line_contains.iter().any(|p| stripped.contains(p))
    });
    let lines = remove_excluded_definitions(lines, exclusions);
    let lines = strip_rpc_options(lines, skip.option_blocks);
    collapse_empty_rpc_blocks(lines)
}

fn trim_blank_edges(mut lines: Vec<String>) -> Vec<String> {
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

fn definition_name<'a>(stripped: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = stripped.strip_prefix(keyword)?.trim_start();
    let end = rest
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Remove excluded message and RPC definitions, tracking brace depth so the
/// whole block goes, never a partial one.
fn remove_excluded_definitions(lines: Vec<String>, exclusions: Exclusions) -> Vec<String> {
    if exclusions.messages.is_empty() && exclusions.rpcs.is_empty() {
        return lines;
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut skipping = false;
    let mut depth: i64 = 0;

    for line in lines {
        let stripped = line.trim();

        if skipping {
            depth += brace_delta(stripped);
            if depth <= 0 {
                skipping = false;
                depth = 0;
            }
            continue;
        }

        if let Some(name) = definition_name(stripped, "message ") {
            if exclusions.messages.contains(&name) {
                skipping = true;
                depth = brace_delta(stripped);
                if depth <= 0 {
                    skipping = false;
                }
                continue;
            }
        }

        if let Some(name) = definition_name(stripped, "rpc ") {
            if exclusions.rpcs.contains(&name) {
                if stripped.ends_with(';') {
                    continue;
                }
                if stripped.contains('{') {
                    skipping = true;
                    depth = brace_delta(stripped);
                    continue;
                }
            }
        }

        result.push(line);
    }

    result
}

/// Drop skip-listed option lines inside RPC blocks.
///
/// An RPC whose block held nothing but such options is collapsed to the
/// single-line `rpc ...;` form.
fn strip_rpc_options(lines: Vec<String>, option_blocks: &[&str]) -> Vec<String> {
    let mut result = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let stripped = lines[i].trim();
        if !(stripped.contains("rpc ") && stripped.ends_with('{')) {
            result.push(lines[i].clone());
            i += 1;
            continue;
        }

        let rpc_line = &lines[i];
        let mut kept = Vec::new();
        let mut depth: i64 = brace_delta(stripped);
        let mut j = i + 1;
        let mut closed = false;

        while j < lines.len() {
            let inner = lines[j].trim();
            depth += brace_delta(inner);
            if depth <= 0 {
                closed = true;
                break;
            }
            if !option_blocks.iter().any(|p| inner.contains(p)) {
                kept.push(lines[j].clone());
            } else {
                // Option value may span lines; swallow until it balances.
                let mut option_depth = brace_delta(inner);
                while option_depth > 0 && j + 1 < lines.len() {
                    j += 1;
                    let d = brace_delta(lines[j].trim());
                    option_depth += d;
                    depth += d;
                }
            }
            j += 1;
        }

        if closed && kept.iter().any(|l| !l.trim().is_empty()) {
            result.push(rpc_line.clone());
            result.extend(kept);
            result.push(lines[j].clone());
        } else {
            result.push(to_single_line_rpc(rpc_line));
        }
        i = if closed { j + 1 } else { lines.len() };
    }

    result
}

/// Collapse `rpc ... {}` blocks with empty bodies to `rpc ...;`.
fn collapse_empty_rpc_blocks(lines: Vec<String>) -> Vec<String> {
    let mut result = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let stripped = lines[i].trim();
        if stripped.contains("rpc ") && stripped.ends_with('{') {
            let mut j = i + 1;
            while j < lines.len() && lines[j].trim().is_empty() {
                j += 1;
            }
            if j < lines.len() && lines[j].trim() == "}" {
                result.push(to_single_line_rpc(&lines[i]));
                i = j + 1;
                continue;
            }
        }
        result.push(lines[i].clone());
        i += 1;
    }

    result
}

fn to_single_line_rpc(rpc_line: &str) -> String {
    let trimmed = rpc_line.trim_end().trim_end_matches('{').trim_end();
    format!("{};", trimmed)
}
