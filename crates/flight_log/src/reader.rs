//! Whole-file log reading

use contracts::ContractError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read every line of the log at `path`.
///
/// A missing file is an empty log. Invalid UTF-8 is replaced rather than
/// rejected so one damaged line cannot hide the rest of the file.
pub fn read_log_lines(path: &Path) -> Result<Vec<String>, ContractError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No flight log yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let lines: Vec<String> = String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect();

    debug!(path = %path.display(), lines = lines.len(), "Read flight log");
    Ok(lines)
}
