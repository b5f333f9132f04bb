use error_set::error_set;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod diff;
pub mod filter;
mod git;
pub mod paths;
pub mod reconcile;
pub mod report;

pub use diff::{LineEntry, ParsedDiff, parse_diff};
pub use filter::{ConfigError, FilterRule};
pub use paths::InputError;
pub use report::{AnalysisResult, FileReport, OutputError, RunSummary};

/// Default per-file limit for `git diff`
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

error_set! {
    /// Top-level error for a diff-lines run
    DiffLinesError := {
        InputError(InputError),
        OutputError(OutputError),
    } || GitCommandError

    /// Errors from git command execution
    GitCommandError := {
        #[display("Failed to run git diff: {message}")]
        DiffFailed { message: String },
        #[display("git diff failed: {stderr}")]
        DiffExitError { stderr: String },
        #[display("Invalid UTF-8 in git diff output: {message}")]
        InvalidUtf8 { message: String },
        #[display("Failed to read git diff output: {message}")]
        ReadFailed { message: String },
        #[display("Failed to wait for git diff: {message}")]
        WaitFailed { message: String },
        #[display("git diff timed out after {seconds}s")]
        TimedOut { seconds: u64 },
    }
}

/// Which revisions to compare and how to filter the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Repository the diff command runs in
    pub repo_path: PathBuf,
    /// Base revision, the "before" side
    pub base: String,
    /// Head revision, the "after" side
    pub head: String,
    /// Remote whose tracking branches are compared, e.g. `origin`
    pub remote: Option<String>,
    /// Rule applied to both added and deleted lines
    pub rule: FilterRule,
    /// Limit for a single file's `git diff`
    pub timeout: Duration,
}

impl CollectorConfig {
    /// Compare `origin/main...origin/feature-branch` in the current directory
    pub fn new(rule: FilterRule) -> Self {
        Self {
            repo_path: PathBuf::from("."),
            base: "main".to_string(),
            head: "feature-branch".to_string(),
            remote: Some("origin".to_string()),
            rule,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Revision range passed to `git diff`, e.g. `origin/main...origin/feature`
    pub fn revision_range(&self) -> String {
        match self.remote.as_deref().filter(|r| !r.is_empty()) {
            Some(remote) => format!("{remote}/{}...{remote}/{}", self.base, self.head),
            None => format!("{}...{}", self.base, self.head),
        }
    }
}

/// Run the diff → filter → reconcile pipeline on one file's diff text.
///
/// # Examples
/// ```
/// use diff_lines::{analyze_diff, FilterRule, LineEntry};
///
/// let diff = "@@ -10,0 +10,2 @@\n+  Log    hello\n+    \n";
/// let result = analyze_diff("suite.robot", diff, FilterRule::Syntax);
/// assert_eq!(result.added_lines, vec![LineEntry::new(10, "Log    hello")]);
/// assert!(result.deleted_lines.is_empty());
/// ```
#[must_use]
pub fn analyze_diff(file: &str, diff_output: &str, rule: FilterRule) -> AnalysisResult {
    let ParsedDiff { added, deleted } = parse_diff(diff_output);
    let added = filter::filter(added, rule);
    let deleted = filter::filter(deleted, rule);
    let added = reconcile::reconcile(added, &deleted);

    AnalysisResult {
        file: file.to_string(),
        added_lines: added,
        deleted_lines: deleted,
    }
}

/// Collects filtered line changes for files between two revisions
pub struct ChangeCollector {
    config: CollectorConfig,
}

impl ChangeCollector {
    /// Create a new collector for the given revisions and rule
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Configuration this collector was created with
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Analyze a single file
    ///
    /// # Errors
    ///
    /// Returns [`GitCommandError`] when `git diff` cannot be run, exits with a
    /// non-zero status, prints non-UTF-8 output, or exceeds the timeout. A file
    /// without changes is not an error: it yields empty line lists.
    pub fn analyze(&self, file: &str) -> Result<AnalysisResult, GitCommandError> {
        let diff_output = self.raw_diff(file)?;
        Ok(analyze_diff(file, &diff_output, self.config.rule))
    }

    /// Analyze every file in order, turning diff failures into failed reports
    pub fn collect<S: AsRef<str>>(&self, files: &[S]) -> (Vec<FileReport>, RunSummary) {
        let reports: Vec<FileReport> = files
            .iter()
            .map(|file| {
                let file: &str = file.as_ref();
                tracing::info!(file, "processing file");
                match self.analyze(file) {
                    Ok(result) => {
                        tracing::debug!(
                            file,
                            added = result.added_lines.len(),
                            deleted = result.deleted_lines.len(),
                            "analyzed"
                        );
                        FileReport::Analyzed(result)
                    }
                    Err(e) => {
                        tracing::warn!(file, error = %e, "diff failed");
                        FileReport::Failed {
                            file: file.to_string(),
                            error: e.to_string(),
                        }
                    }
                }
            })
            .collect();

        let summary = RunSummary::tally(&reports);
        (reports, summary)
    }

    /// Analyze the files listed in `list_path` and write the results to `output_path`
    ///
    /// # Errors
    ///
    /// Fails before running any diff if the list cannot be read, and fails
    /// without leaving a partial file if the results cannot be written. Per-file
    /// diff failures are recorded in the output and counted in the summary.
    pub fn run(&self, list_path: &Path, output_path: &Path) -> Result<RunSummary, DiffLinesError> {
        let files = paths::read_path_list(list_path)?;
        tracing::info!(
            files = files.len(),
            range = %self.config.revision_range(),
            rule = %self.config.rule,
            "collecting changes"
        );

        let (reports, summary) = self.collect(&files);
        report::write_reports(output_path, &reports)?;

        tracing::info!(
            output = %output_path.display(),
            analyzed = summary.analyzed,
            failed = summary.failed,
            "results written"
        );
        Ok(summary)
    }

    /// Raw `git diff -U0` output for one file
    fn raw_diff(&self, file: &str) -> Result<String, GitCommandError> {
        let range = self.config.revision_range();
        git::run_git(
            &self.config.repo_path,
            &diff_args(&range, file),
            self.config.timeout,
        )
    }
}

/// Arguments for a zero-context diff of exactly one path.
///
/// The path is matched literally, never as a glob or magic pathspec, and the
/// range can never be read as an option even if a revision starts with `-`.
fn diff_args<'a>(range: &'a str, file: &'a str) -> [&'a str; 9] {
    [
        "--literal-pathspecs",
        "diff",
        "--no-ext-diff",
        "--no-color",
        "-U0",
        "--end-of-options",
        range,
        "--",
        file,
    ]
}
