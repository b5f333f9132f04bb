use super::LineEntry;
use super::line::DiffLine;

/// Base/head line cursors for one file's diff.
///
/// Both cursors start at 0 and only move forward inside a hunk; a parsed hunk
/// header resets them to the declared start lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HunkTracker {
    pub base_line: u32,
    pub head_line: u32,
}

/// An added or deleted line, tagged with its side of the diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(LineEntry),
    Deleted(LineEntry),
}

impl HunkTracker {
    /// Create a tracker with both cursors at zero, before any hunk header
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the cursors past one classified line.
    ///
    /// Returns the change carried by the line, numbered with the cursor value
    /// from before the advance.
    pub fn step(&mut self, line: DiffLine<'_>) -> Option<Change> {
        match line {
            DiffLine::Header(Some(header)) => {
                self.base_line = header.base_start;
                self.head_line = header.head_start;
                None
            }
            DiffLine::Header(None) => {
                tracing::debug!(
                    base_line = self.base_line,
                    head_line = self.head_line,
                    "ignoring malformed hunk header"
                );
                None
            }
            DiffLine::Added(content) => {
                let entry = LineEntry::new(self.head_line, content.trim());
                self.head_line = self.head_line.saturating_add(1);
                Some(Change::Added(entry))
            }
            DiffLine::Deleted(content) => {
                let entry = LineEntry::new(self.base_line, content.trim());
                self.base_line = self.base_line.saturating_add(1);
                Some(Change::Deleted(entry))
            }
            DiffLine::Context => {
                self.base_line = self.base_line.saturating_add(1);
                self.head_line = self.head_line.saturating_add(1);
                None
            }
        }
    }
}
