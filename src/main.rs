use clap::Parser;
use diff_lines::{ChangeCollector, CollectorConfig, DEFAULT_TIMEOUT, FilterRule};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "diff-lines")]
#[command(about = "Collect filtered added/deleted lines of changed files between two revisions")]
struct Cli {
    /// Filter rule: `syntax` drops blanks, comments, [Documentation] and [Tags];
    /// `testid` keeps only [Documentation]
    #[arg(value_parser = str::parse::<FilterRule>)]
    mode: FilterRule,

    /// File with one repository-relative path per line
    changed_files: PathBuf,

    /// Where to write the JSON results
    #[arg(short, long, default_value = "code_changes.json")]
    output: PathBuf,

    /// Repository to run `git diff` in
    #[arg(short = 'C', long, default_value = ".")]
    repo: PathBuf,

    /// Base revision
    #[arg(long, env = "BASE_BRANCH", default_value = "main")]
    base: String,

    /// Head revision
    #[arg(long, env = "HEAD_BRANCH", default_value = "feature-branch")]
    head: String,

    /// Remote prefix for both revisions; pass an empty string to use them as-is
    #[arg(long, default_value = "origin")]
    remote: String,

    /// Seconds to wait for `git diff` on a single file
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl Cli {
    fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            repo_path: self.repo.clone(),
            base: self.base.clone(),
            head: self.head.clone(),
            remote: Some(self.remote.clone()).filter(|r| !r.is_empty()),
            rule: self.mode,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let collector = ChangeCollector::new(cli.collector_config());
    match collector.run(&cli.changed_files, &cli.output) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            eprintln!(
                "{} of {} files could not be diffed; see {}",
                summary.failed,
                summary.analyzed + summary.failed,
                cli.output.display()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
