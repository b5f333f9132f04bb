use super::hunk::HunkHeader;

/// Classification of a single line of `git diff -U0` output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// Line starting with `@@`; `None` when the ranges could not be parsed
    Header(Option<HunkHeader>),
    /// Added line, text after the `+` marker
    Added(&'a str),
    /// Deleted line, text after the `-` marker
    Deleted(&'a str),
    /// Everything else, including `+++`/`---` file headers and blank lines
    Context,
}

impl<'a> DiffLine<'a> {
    /// Classify one line of diff text.
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with("@@") {
            return DiffLine::Header(HunkHeader::parse(line));
        }
        if line.starts_with("+++") || line.starts_with("---") {
            return DiffLine::Context;
        }
        if let Some(content) = line.strip_prefix('+') {
            DiffLine::Added(content)
        } else if let Some(content) = line.strip_prefix('-') {
            DiffLine::Deleted(content)
        } else {
            DiffLine::Context
        }
    }
}
