//! Line-based unified diff for dry-run reporting.

/// One line-level edit between the old and new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    /// Line present in both; (old index, new index).
    Equal(usize, usize),
    /// Line removed from the old text.
    Delete(usize),
    /// Line added in the new text.
    Insert(usize),
}

/// Render a unified diff of `old` against `new` with three lines of context.
///
/// Returns an empty string when the texts are identical.
pub fn unified_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    const CONTEXT: usize = 3;

    if old == new {
        return String::new();
    }

    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let edits = diff_edits(&old_lines, &new_lines);

    // Keep every change plus up to CONTEXT equal lines on either side;
    // contiguous kept runs become hunks.
    let mut keep = vec![false; edits.len()];
    for (i, edit) in edits.iter().enumerate() {
        if !matches!(edit, Edit::Equal(_, _)) {
            let lo = i.saturating_sub(CONTEXT);
            let hi = (i + CONTEXT + 1).min(edits.len());
            for k in keep.iter_mut().take(hi).skip(lo) {
                *k = true;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("--- {}\n+++ {}\n", old_label, new_label));

    let mut i = 0;
    while i < edits.len() {
        if !keep[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i < edits.len() && keep[i] {
            i += 1;
        }
        out.push_str(&render_hunk(&edits[start..i], &old_lines, &new_lines));
    }

    out
}

/// Longest-common-subsequence edit script over the two line slices.
fn diff_edits(old: &[&str], new: &[&str]) -> Vec<Edit> {
    let n = old.len();
    let m = new.len();
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut edits = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if old[i] == new[j] {
            edits.push(Edit::Equal(i, j));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            edits.push(Edit::Delete(i));
            i += 1;
        } else {
            edits.push(Edit::Insert(j));
            j += 1;
        }
    }
    edits.extend((i..n).map(Edit::Delete));
    edits.extend((j..m).map(Edit::Insert));
    edits
}

fn render_hunk(edits: &[Edit], old_lines: &[&str], new_lines: &[&str]) -> String {
    let mut old_start = None;
    let mut new_start = None;
    let mut old_count = 0usize;
    let mut new_count = 0usize;

    for edit in edits {
        match edit {
            Edit::Equal(i, j) => {
                old_start.get_or_insert(*i);
                new_start.get_or_insert(*j);
                old_count += 1;
                new_count += 1;
            }
            Edit::Delete(i) => {
                old_start.get_or_insert(*i);
                old_count += 1;
            }
            Edit::Insert(j) => {
                new_start.get_or_insert(*j);
                new_count += 1;
            }
        }
    }

    let hunk_pos = |start: Option<usize>, count: usize| match (start, count) {
        (_, 0) => 0,
        (Some(s), _) => s + 1,
        (None, _) => 1,
    };

    let mut out = format!(
        "@@ -{},{} +{},{} @@\n",
        hunk_pos(old_start, old_count),
        old_count,
        hunk_pos(new_start, new_count),
        new_count
    );
    for edit in edits {
        match edit {
            Edit::Equal(i, _) => {
                out.push(' ');
                out.push_str(old_lines[*i]);
            }
            Edit::Delete(i) => {
                out.push('-');
                out.push_str(old_lines[*i]);
            }
            Edit::Insert(j) => {
                out.push('+');
                out.push_str(new_lines[*j]);
            }
        }
        out.push('\n');
    }
    out
}
