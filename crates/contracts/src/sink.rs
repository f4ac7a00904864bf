//! EventSink trait - output interface of the live detector
//!
//! Defines the abstract interface for event sinks.

use crate::{ContractError, EventRecord};

/// Event output trait
///
/// Called synchronously from the telemetry tick. Implementations must not
/// hold anything across calls that a crash could leave half-written.
pub trait EventSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Append one confirmed event
    ///
    /// # Errors
    /// Returns write error (should include context)
    fn append(&mut self, record: &EventRecord) -> Result<(), ContractError>;
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn append(&mut self, record: &EventRecord) -> Result<(), ContractError> {
        (**self).append(record)
    }
}
