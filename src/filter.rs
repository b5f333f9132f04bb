//! Content rules deciding which changed lines are reported.

use crate::diff::LineEntry;
use error_set::error_set;
use std::fmt;
use std::str::FromStr;

const DOCUMENTATION: &str = "[Documentation]";
const TAGS: &str = "[Tags]";
const COMMENT: &str = "#";

error_set! {
    /// Errors from run configuration
    ConfigError := {
        /// Filter rule is not one of the supported names
        #[display("Unknown filter rule '{value}': expected 'syntax' or 'testid'")]
        UnknownFilterRule { value: String },
    }
}

/// Named rule set applied to added and deleted lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRule {
    /// Keep lines that change test behaviour: drops blanks, comments,
    /// `[Documentation]` and `[Tags]` settings
    Syntax,
    /// Keep only `[Documentation]` settings, where test ids live
    Testid,
}

impl FilterRule {
    /// Whether the rule retains this entry
    #[must_use]
    pub fn keeps(self, entry: &LineEntry) -> bool {
        let content = entry.content.as_str();
        match self {
            FilterRule::Syntax => {
                !(content.trim().is_empty()
                    || content.starts_with(DOCUMENTATION)
                    || content.starts_with(TAGS)
                    || content.starts_with(COMMENT))
            }
            FilterRule::Testid => content.starts_with(DOCUMENTATION),
        }
    }

    /// Name accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            FilterRule::Syntax => "syntax",
            FilterRule::Testid => "testid",
        }
    }
}

impl FromStr for FilterRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "syntax" => Ok(FilterRule::Syntax),
            "testid" => Ok(FilterRule::Testid),
            _ => Err(ConfigError::UnknownFilterRule {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keep the entries the rule accepts, in their original order.
#[must_use]
pub fn filter(entries: Vec<LineEntry>, rule: FilterRule) -> Vec<LineEntry> {
    entries.into_iter().filter(|e| rule.keeps(e)).collect()
}
