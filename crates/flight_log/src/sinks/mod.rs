//! Event sink implementations

mod file;
mod log;

pub use file::FlightLogWriter;
pub use log::LogSink;
