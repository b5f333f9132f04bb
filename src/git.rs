//! Bounded execution of `git` subprocesses.

use crate::GitCommandError;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run `git -C <repo_path> <args>` and return its stdout.
///
/// Arguments are passed straight to the process, never through a shell. The
/// child is killed if it has not exited within `timeout`.
pub(crate) fn run_git(
    repo_path: &Path,
    args: &[&str],
    timeout: Duration,
) -> Result<String, GitCommandError> {
    let mut child = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| GitCommandError::DiffFailed {
            message: e.to_string(),
        })?;

    // Drain both pipes while waiting so a large diff cannot fill the pipe buffer
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = wait_with_timeout(&mut child, timeout)?;
    let stdout = collect(stdout)?;
    let stderr = collect(stderr)?;

    if !status.success() {
        return Err(GitCommandError::DiffExitError {
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }

    String::from_utf8(stdout).map_err(|e| GitCommandError::InvalidUtf8 {
        message: e.to_string(),
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(handle: JoinHandle<std::io::Result<Vec<u8>>>) -> Result<Vec<u8>, GitCommandError> {
    handle
        .join()
        .map_err(|_| GitCommandError::ReadFailed {
            message: "output reader thread panicked".to_string(),
        })?
        .map_err(|e| GitCommandError::ReadFailed {
            message: e.to_string(),
        })
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, GitCommandError> {
    let start = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if start.elapsed() >= timeout => {
                // SIGKILL on Unix, TerminateProcess on Windows
                let _ = child.kill();
                let _ = child.wait();
                return Err(GitCommandError::TimedOut {
                    seconds: timeout.as_secs(),
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                return Err(GitCommandError::WaitFailed {
                    message: e.to_string(),
                });
            }
        }
    }
}
