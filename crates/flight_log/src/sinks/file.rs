//! FlightLogWriter - appends event lines to the flight log

use contracts::{ContractError, EventRecord, EventSink};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

use crate::line::format_line;

/// Sink that appends one line per event to a text file.
///
/// The file is opened in append mode for every event and closed again right
/// after, so no handle outlives a single write.
#[derive(Debug, Clone)]
pub struct FlightLogWriter {
    name: String,
    path: PathBuf,
}

impl FlightLogWriter {
    /// Create a writer for `path`. Nothing touches the disk until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            name: "flight_log".to_string(),
            path: path.into(),
        }
    }

    /// Override the sink name used in logs and metrics
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // one write per line keeps a torn write to a single record
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        file.write_all(buf.as_bytes())?;
        file.flush()
    }
}

impl EventSink for FlightLogWriter {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "flight_log_append",
        skip(self, record),
        fields(sink = %self.name, kind = record.kind.as_str())
    )]
    fn append(&mut self, record: &EventRecord) -> Result<(), ContractError> {
        let line = format_line(record);
        self.append_line(&line).map_err(|e| {
            error!(sink = %self.name, path = %self.path.display(), error = %e, "Append failed");
            ContractError::log_write(&self.name, e.to_string())
        })?;
        debug!(path = %self.path.display(), line = %line, "Appended");
        Ok(())
    }
}
