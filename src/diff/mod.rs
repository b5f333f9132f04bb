//! Line-number bookkeeping for `git diff -U0` output.
//!
//! A single file's diff is split into lines, each line is classified once into
//! a [`DiffLine`], and a [`HunkTracker`] turns the classified stream into added
//! lines (numbered in the head revision) and deleted lines (numbered in the base
//! revision).
//!
//! ```
//! use diff_lines::diff::{parse_diff, LineEntry};
//!
//! let parsed = parse_diff("@@ -8 +14 @@\n-Click Button    Submit\n+Click Button    Submit\n");
//! assert_eq!(parsed.deleted, vec![LineEntry::new(8, "Click Button    Submit")]);
//! assert_eq!(parsed.added, vec![LineEntry::new(14, "Click Button    Submit")]);
//! ```

pub mod hunk;
pub mod line;
pub mod tracker;

pub use hunk::HunkHeader;
pub use line::DiffLine;
pub use tracker::{Change, HunkTracker};

use serde::{Deserialize, Serialize};

/// One added or deleted line with its position in the corresponding revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEntry {
    pub line: u32,
    pub content: String,
}

impl LineEntry {
    /// Create an entry for `line` with the given content
    pub fn new(line: u32, content: impl Into<String>) -> Self {
        Self {
            line,
            content: content.into(),
        }
    }
}

/// Added and deleted lines of one file's diff, in diff order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedDiff {
    pub added: Vec<LineEntry>,
    pub deleted: Vec<LineEntry>,
}

/// Parse the unified diff of a single file.
///
/// Content is trimmed of surrounding whitespace. Lines that are neither hunk
/// headers nor changes advance both cursors, so the diff should be produced
/// with zero context lines for the numbers to line up with the hunk headers.
///
/// The `\ No newline at end of file` marker is such a line too. When it
/// follows a deleted last line, the addition after it is numbered one past
/// the start its hunk header declares.
#[must_use]
pub fn parse_diff(diff_output: &str) -> ParsedDiff {
    let mut tracker = HunkTracker::new();
    let mut parsed = ParsedDiff::default();

    for line in diff_output.lines() {
        match tracker.step(DiffLine::classify(line)) {
            Some(Change::Added(entry)) => parsed.added.push(entry),
            Some(Change::Deleted(entry)) => parsed.deleted.push(entry),
            None => {}
        }
    }

    parsed
}
