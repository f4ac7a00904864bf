//! Detector / log / reconciler metrics
//!
//! Counters go through the `metrics` facade; without an installed recorder
//! they are no-ops. [`DetectorStats`] keeps the same numbers in memory for
//! run summaries.

use contracts::{EventKind, TickOutcome};
use metrics::{counter, gauge};
use serde::Serialize;

/// Record what the detector did with one sample
pub fn record_tick(outcome: TickOutcome) {
    counter!(
        "flightlog_samples_total",
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Record a confirmed takeoff/landing
pub fn record_event_detected(kind: EventKind) {
    counter!(
        "flightlog_events_detected_total",
        "kind" => kind.as_str()
    )
    .increment(1);
}

/// Record an append to an event sink
pub fn record_log_write(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "flightlog_log_writes_total",
        "sink" => sink_name.to_string(),
        "status" => status
    )
    .increment(1);
}

/// Record a log line the reconciler skipped
pub fn record_line_rejected(reason: &'static str) {
    counter!(
        "flightlog_lines_rejected_total",
        "reason" => reason
    )
    .increment(1);
}

/// Record the result of a reconciliation pass
pub fn record_reconciliation(lines: usize, sessions: usize) {
    counter!("flightlog_reconciliations_total").increment(1);
    gauge!("flightlog_log_lines").set(lines as f64);
    gauge!("flightlog_sessions").set(sessions as f64);
}

/// In-memory tick/event aggregator
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectorStats {
    /// Samples seen
    pub samples: u64,
    /// Dropped before detection (replay, no clock, bad date)
    pub discarded: u64,
    /// Ignored for arriving too soon
    pub debounced: u64,
    /// Discontinuity resets
    pub resets: u64,
    /// Samples that ran through detection
    pub processed: u64,
    /// Confirmed takeoffs
    pub starts: u64,
    /// Confirmed landings
    pub landings: u64,
    /// Events the sink failed to persist
    pub write_failures: u64,
}

impl DetectorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one sample.
    ///
    /// Only aggregates; the `flightlog_samples_total` counter is bumped by
    /// the detector itself.
    pub fn record_outcome(&mut self, outcome: TickOutcome) {
        self.samples += 1;
        match outcome {
            TickOutcome::Discarded => self.discarded += 1,
            TickOutcome::Debounced => self.debounced += 1,
            TickOutcome::Reset => self.resets += 1,
            TickOutcome::Processed => self.processed += 1,
        }
    }

    /// Count one confirmed event and whether it reached the sink
    pub fn record_event(&mut self, kind: EventKind, written: bool) {
        match kind {
            EventKind::Start => self.starts += 1,
            EventKind::Landing => self.landings += 1,
        }
        if !written {
            self.write_failures += 1;
        }
    }

    /// Confirmed events
    pub fn events(&self) -> u64 {
        self.starts + self.landings
    }
}
