use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{char, u32 as decimal},
    combinator::opt,
    sequence::preceded,
};

/// Start/count pairs declared by a hunk header line.
///
/// Format: `@@ -base_start[,base_count] +head_start[,head_count] @@ section`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub base_start: u32,
    pub base_count: Option<u32>,
    pub head_start: u32,
    pub head_count: Option<u32>,
}

impl HunkHeader {
    /// Parse a hunk header line.
    ///
    /// Only the `@@ -N[,M] +N[,M]` prefix has to be present; the closing `@@` and
    /// any section text after it are ignored. Returns `None` for anything else.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        header(line).ok().map(|(_, header)| header)
    }
}

fn header(input: &str) -> IResult<&str, HunkHeader> {
    let (rest, (_, (base_start, base_count), _, (head_start, head_count))) =
        (tag("@@ -"), range, tag(" +"), range).parse(input)?;

    Ok((
        rest,
        HunkHeader {
            base_start,
            base_count,
            head_start,
            head_count,
        },
    ))
}

/// `start` or `start,count`
fn range(input: &str) -> IResult<&str, (u32, Option<u32>)> {
    (decimal, opt(preceded(char(','), decimal))).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn hh(
        base_start: u32,
        base_count: Option<u32>,
        head_start: u32,
        head_count: Option<u32>,
    ) -> HunkHeader {
        HunkHeader {
            base_start,
            base_count,
            head_start,
            head_count,
        }
    }

    #[test]
    fn parse_with_counts() {
        assert_eq!(
            HunkHeader::parse("@@ -10,5 +20,3 @@"),
            Some(hh(10, Some(5), 20, Some(3)))
        );
    }

    #[test]
    fn parse_without_counts() {
        assert_eq!(
            HunkHeader::parse("@@ -15 +14,0 @@"),
            Some(hh(15, None, 14, Some(0)))
        );
        assert_eq!(HunkHeader::parse("@@ -1 +1 @@"), Some(hh(1, None, 1, None)));
    }

    #[test]
    fn parse_with_section_text() {
        assert_eq!(
            HunkHeader::parse("@@ -38,0 +39,5 @@ *** Test Cases ***"),
            Some(hh(38, Some(0), 39, Some(5)))
        );
    }

    #[test]
    fn parse_new_file() {
        assert_eq!(
            HunkHeader::parse("@@ -0,0 +1,10 @@"),
            Some(hh(0, Some(0), 1, Some(10)))
        );
    }

    #[test]
    fn parse_without_closing_marker() {
        assert_eq!(
            HunkHeader::parse("@@ -7,2 +9,2"),
            Some(hh(7, Some(2), 9, Some(2)))
        );
    }

    #[test]
    fn reject_malformed() {
        assert_eq!(HunkHeader::parse("@@"), None);
        assert_eq!(HunkHeader::parse("@@ garbage @@"), None);
        assert_eq!(HunkHeader::parse("@@ -a,1 +2 @@"), None);
        assert_eq!(HunkHeader::parse("@@ +2 -1 @@"), None);
        assert_eq!(HunkHeader::parse("@@ -1,2"), None);
    }

    #[test]
    fn reject_combined_diff_header() {
        // merge diffs use @@@ and are not unified hunks
        assert_eq!(HunkHeader::parse("@@@ -1,2 -1,2 +1,3 @@@"), None);
    }
}
