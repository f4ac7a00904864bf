//! # Flight Log
//!
//! Append-only text log of takeoff and landing events.
//!
//! - [`line`]: the comma separated line codec, including the legacy layout
//! - [`FlightLogWriter`]: appends one line per event, opening the file per write
//! - [`LogSink`]: tracing-only sink for dry runs
//! - [`read_log_lines`]: whole-file read for reconciliation

mod error;
pub mod line;
mod reader;
mod sinks;

pub use error::LineError;
pub use line::{format_line, parse_line, RawLine};
pub use reader::read_log_lines;
pub use sinks::{FlightLogWriter, LogSink};
