//! Line-level diff between two text bodies.
//!
//! This is a deliberate single-pass heuristic with a bounded lookahead
//! window, not a minimal edit script. Its output is deterministic and must
//! stay stable: clients compare historical diffs byte for byte, so do not
//! swap it for an LCS/Myers diff (that changes output on ambiguous inputs).
//! An improved algorithm would have to ship under a separate name.

use serde::Serialize;

/// How far ahead each cursor scans for a matching line before giving up and
/// emitting a paired replace.
const LOOKAHEAD_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Added,
    Removed,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number_a: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number_b: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub lines: Vec<DiffLine>,
    pub stats: DiffStats,
}

/// Empty input is zero lines; otherwise split on `\n`, so a trailing
/// newline contributes a final empty line.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// True when `needle` appears within the next `LOOKAHEAD_WINDOW` lines
/// after position `from`.
fn near_match(lines: &[&str], from: usize, needle: &str) -> bool {
    lines[from + 1..]
        .iter()
        .take(LOOKAHEAD_WINDOW)
        .any(|line| *line == needle)
}

/// Compare two text bodies line by line.
///
/// Walks both sequences with one cursor each. Matching lines are emitted as
/// unchanged; on a mismatch, a nearby match for the A-side line further down
/// B means B has inserted lines (emit added), the mirror case means A has
/// removed lines (emit removed), and no nearby match either way is treated
/// as a replace pair. O(n * window), no allocation beyond the output.
pub fn line_diff(a: &str, b: &str) -> LineDiff {
    let a_lines = split_lines(a);
    let b_lines = split_lines(b);

    let mut lines = Vec::new();
    let mut stats = DiffStats::default();
    let mut i = 0;
    let mut j = 0;

    while i < a_lines.len() || j < b_lines.len() {
        if i >= a_lines.len() {
            // A exhausted: everything left in B was added.
            lines.push(DiffLine {
                kind: DiffKind::Added,
                text: b_lines[j].to_string(),
                line_number_a: None,
                line_number_b: Some(j + 1),
            });
            stats.added += 1;
            j += 1;
            continue;
        }

        if j >= b_lines.len() {
            // B exhausted: everything left in A was removed.
            lines.push(DiffLine {
                kind: DiffKind::Removed,
                text: a_lines[i].to_string(),
                line_number_a: Some(i + 1),
                line_number_b: None,
            });
            stats.removed += 1;
            i += 1;
            continue;
        }

        if a_lines[i] == b_lines[j] {
            lines.push(DiffLine {
                kind: DiffKind::Unchanged,
                text: a_lines[i].to_string(),
                line_number_a: Some(i + 1),
                line_number_b: Some(j + 1),
            });
            stats.unchanged += 1;
            i += 1;
            j += 1;
            continue;
        }

        if near_match(&b_lines, j, a_lines[i]) {
            // A's line reappears shortly in B: B[j] is an insertion.
            lines.push(DiffLine {
                kind: DiffKind::Added,
                text: b_lines[j].to_string(),
                line_number_a: None,
                line_number_b: Some(j + 1),
            });
            stats.added += 1;
            j += 1;
        } else if near_match(&a_lines, i, b_lines[j]) {
            // B's line reappears shortly in A: A[i] was deleted.
            lines.push(DiffLine {
                kind: DiffKind::Removed,
                text: a_lines[i].to_string(),
                line_number_a: Some(i + 1),
                line_number_b: None,
            });
            stats.removed += 1;
            i += 1;
        } else {
            // No nearby match in either direction: a replace pair.
            lines.push(DiffLine {
                kind: DiffKind::Removed,
                text: a_lines[i].to_string(),
                line_number_a: Some(i + 1),
                line_number_b: None,
            });
            lines.push(DiffLine {
                kind: DiffKind::Added,
                text: b_lines[j].to_string(),
                line_number_a: None,
                line_number_b: Some(j + 1),
            });
            stats.removed += 1;
            stats.added += 1;
            i += 1;
            j += 1;
        }
    }

    LineDiff { lines, stats }
}
