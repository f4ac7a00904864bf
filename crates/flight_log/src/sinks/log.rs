//! LogSink - reports events through tracing only

use contracts::{ContractError, EventRecord, EventSink};
use tracing::info;

use crate::line::format_line;

/// Sink that logs the line it would have written. Used for dry runs.
pub struct LogSink {
    name: String,
    count: usize,
}

impl LogSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
        }
    }

    /// Events seen so far
    pub fn count(&self) -> usize {
        self.count
    }
}

impl EventSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn append(&mut self, record: &EventRecord) -> Result<(), ContractError> {
        self.count += 1;
        info!(
            sink = %self.name,
            kind = record.kind.as_str(),
            origin = %record.origin.as_char(),
            line = %format_line(record),
            "Flight event (not persisted)"
        );
        Ok(())
    }
}
