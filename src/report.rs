//! Result records and the JSON file they are written to.

use crate::diff::LineEntry;
use error_set::error_set;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

error_set! {
    /// Errors from writing the results file
    OutputError := {
        #[display("Failed to serialize results: {message}")]
        SerializeFailed { message: String },
        #[display("Failed to write {path}: {message}")]
        WriteFailed { path: String, message: String },
    }
}

/// Filtered changes of one file.
///
/// `added_lines` are additionally reconciled against `deleted_lines`, see
/// [`crate::reconcile::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file: String,
    pub added_lines: Vec<LineEntry>,
    pub deleted_lines: Vec<LineEntry>,
}

/// One element of the results file.
///
/// Serialized without a tag: an analyzed file has exactly `file`,
/// `added_lines` and `deleted_lines`, a failed one has `file` and `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileReport {
    Analyzed(AnalysisResult),
    Failed { file: String, error: String },
}

impl FileReport {
    /// Path the record is about, whether or not its diff succeeded
    pub fn file(&self) -> &str {
        match self {
            FileReport::Analyzed(result) => &result.file,
            FileReport::Failed { file, .. } => file,
        }
    }

    /// Whether the file's diff could not be produced
    pub fn is_failed(&self) -> bool {
        matches!(self, FileReport::Failed { .. })
    }
}

/// Counts for a finished run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub analyzed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Count analyzed and failed records
    pub fn tally(reports: &[FileReport]) -> Self {
        let failed = reports.iter().filter(|r| r.is_failed()).count();
        Self {
            analyzed: reports.len() - failed,
            failed,
        }
    }
}

/// Serialize `reports` as pretty JSON and write them to `path` in one step.
///
/// The document is written to a temporary file next to `path` and then renamed
/// over it, so a failure leaves no partial results file behind.
pub fn write_reports(path: &Path, reports: &[FileReport]) -> Result<(), OutputError> {
    let mut json = serde_json::to_vec_pretty(reports).map_err(|e| OutputError::SerializeFailed {
        message: e.to_string(),
    })?;
    json.push(b'\n');

    let write_failed = |message: String| OutputError::WriteFailed {
        path: path.display().to_string(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_failed(e.to_string()))?;
    file.write_all(&json)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| write_failed(e.to_string()))?;
    file.persist(path)
        .map_err(|e| write_failed(e.error.to_string()))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Vec<FileReport> {
        vec![
            FileReport::Analyzed(AnalysisResult {
                file: "tests/login.robot".to_string(),
                added_lines: vec![LineEntry::new(
                    5,
                    "[Documentation]    Verifies login flow",
                )],
                deleted_lines: vec![],
            }),
            FileReport::Failed {
                file: "tests/gone.robot".to_string(),
                error: "git diff failed: fatal: bad revision".to_string(),
            },
        ]
    }

    #[test]
    fn serialized_shape() {
        insta::assert_json_snapshot!(sample(), @r#"
        [
          {
            "file": "tests/login.robot",
            "added_lines": [
              {
                "line": 5,
                "content": "[Documentation]    Verifies login flow"
              }
            ],
            "deleted_lines": []
          },
          {
            "file": "tests/gone.robot",
            "error": "git diff failed: fatal: bad revision"
          }
        ]
        "#);
    }

    #[test]
    fn analyzed_record_has_only_contract_fields() {
        let value = serde_json::to_value(&sample()[0]).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["added_lines", "deleted_lines", "file"]);
    }

    #[test]
    fn reports_roundtrip_through_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: Vec<FileReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn summary_counts_failures() {
        assert_eq!(
            RunSummary::tally(&sample()),
            RunSummary {
                analyzed: 1,
                failed: 1
            }
        );
        assert_eq!(RunSummary::tally(&[]), RunSummary::default());
    }

    #[test]
    fn report_accessors() {
        let reports = sample();
        assert_eq!(reports[0].file(), "tests/login.robot");
        assert!(!reports[0].is_failed());
        assert_eq!(reports[1].file(), "tests/gone.robot");
        assert!(reports[1].is_failed());
    }

    #[test]
    fn write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("code_changes.json");
        write_reports(&path, &sample()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("]\n"));
        let back: Vec<FileReport> = serde_json::from_str(&written).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("code_changes.json");
        std::fs::write(&path, "stale").unwrap();
        write_reports(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[test]
    fn write_to_missing_directory_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("code_changes.json");
        let result = write_reports(&path, &sample());
        assert!(matches!(result, Err(OutputError::WriteFailed { .. })));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
