//! Single-hunk line diffs for previewing fixes.
//!
//! A fix usually touches one region of a document, so the diff is the
//! smallest window covering every changed line, padded with up to
//! [`CONTEXT_LINES`] of context on either side.
//!
//! Comparison is by line content: `\n` and `\r\n` endings and a missing
//! final newline are not differences. Use [`differs_only_in_line_endings`]
//! to tell such texts apart from truly identical ones.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// Context lines shown before and after the changed region.
pub const CONTEXT_LINES: usize = 3;

/// One line of a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum HunkLine {
    Context(String),
    Removed(String),
    Added(String),
}

impl fmt::Display for HunkLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HunkLine::Context(text) => write!(f, " {}", text),
            HunkLine::Removed(text) => write!(f, "-{}", text),
            HunkLine::Added(text) => write!(f, "+{}", text),
        }
    }
}

/// The changed region between two texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// 1-based first line of the hunk in the original, context included.
    pub old_start: usize,
    pub old_len: usize,
    /// 1-based first line of the hunk in the modified text, context included.
    pub new_start: usize,
    pub new_len: usize,
    /// 0-based original lines that were removed or replaced.
    pub old_changed: Range<usize>,
    /// 0-based modified lines that were added or replaced.
    pub new_changed: Range<usize>,
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// `@@ -a,b +c,d @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_len, self.new_start, self.new_len
        )
    }

    pub fn removed(&self) -> usize {
        self.old_changed.len()
    }

    pub fn added(&self) -> usize {
        self.new_changed.len()
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Compute the hunk covering every line that differs.
///
/// Returns `None` when the texts have the same lines, even if their line
/// endings differ.
pub fn compute_hunk(original: &str, modified: &str) -> Option<Hunk> {
    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = modified.lines().collect();
    if old == new {
        return None;
    }

    let prefix = old
        .iter()
        .zip(&new)
        .take_while(|(a, b)| a == b)
        .count();
    // The backward scan stops at the forward cursor on the shorter side.
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    let old_changed = prefix..old.len() - suffix;
    let new_changed = prefix..new.len() - suffix;
    let before = prefix.min(CONTEXT_LINES);
    let after = suffix.min(CONTEXT_LINES);

    let mut lines = Vec::new();
    lines.extend(
        old[prefix - before..prefix]
            .iter()
            .map(|l| HunkLine::Context(l.to_string())),
    );
    lines.extend(old[old_changed.clone()].iter().map(|l| HunkLine::Removed(l.to_string())));
    lines.extend(new[new_changed.clone()].iter().map(|l| HunkLine::Added(l.to_string())));
    lines.extend(
        old[old_changed.end..old_changed.end + after]
            .iter()
            .map(|l| HunkLine::Context(l.to_string())),
    );

    let old_len = before + old_changed.len() + after;
    let new_len = before + new_changed.len() + after;
    let start = prefix - before;

    Some(Hunk {
        old_start: if old_len == 0 { start } else { start + 1 },
        old_len,
        new_start: if new_len == 0 { start } else { start + 1 },
        new_len,
        old_changed,
        new_changed,
        lines,
    })
}

/// Whether two texts have the same lines but are not byte-identical.
pub fn differs_only_in_line_endings(original: &str, modified: &str) -> bool {
    original != modified && compute_hunk(original, modified).is_none()
}

/// Render the hunk between two texts, or an empty string when their lines
/// match.
pub fn diff(original: &str, modified: &str) -> String {
    compute_hunk(original, modified)
        .map(|hunk| hunk.to_string())
        .unwrap_or_default()
}
