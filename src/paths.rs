use error_set::error_set;
use std::path::Path;

error_set! {
    /// Errors from reading the list of changed files
    InputError := {
        #[display("Failed to read changed files list {path}: {message}")]
        ReadFailed { path: String, message: String },
    }
}

/// Read a newline-delimited list of repository-relative paths.
pub fn read_path_list(path: &Path) -> Result<Vec<String>, InputError> {
    let text = std::fs::read_to_string(path).map_err(|e| InputError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(parse_path_list(&text))
}

/// One path per line, surrounding whitespace trimmed, blank lines skipped.
#[must_use]
pub fn parse_path_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
