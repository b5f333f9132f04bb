use crate::diff::LineEntry;

/// Renumber added lines whose text also appears among the deleted lines.
///
/// An added line with the same content as a deleted line is treated as moved:
/// it takes the line number of the first deleted entry with identical content.
/// Deleted entries are not consumed, so several added lines can map to the same
/// deleted line. Blank added lines and lines without a match keep their head
/// revision numbers.
///
/// This is a heuristic, not move detection. Both inputs are expected to be
/// filtered already, and filtering removes the surrounding lines that would tell
/// a real move apart from identical text inserted elsewhere.
#[must_use]
pub fn reconcile(added: Vec<LineEntry>, deleted: &[LineEntry]) -> Vec<LineEntry> {
    added
        .into_iter()
        .map(|mut entry| {
            if entry.content.trim().is_empty() {
                return entry;
            }
            if let Some(original) = deleted.iter().find(|d| d.content == entry.content) {
                entry.line = original.line;
            }
            entry
        })
        .collect()
}
