//! Reconciler - folds the event log into flight sessions
//!
//! A single pass keeps at most one pending session, which only ever holds a
//! start. Starts open a fresh session, landings close one.

use contracts::{EventKind, EventRecord, FlightSession, ReconcilerConfig, SessionEnd};
use flight_log::{parse_line, read_log_lines};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Landings later than this after the pending start belong to a new session
pub const DEFAULT_RELATEDNESS_WINDOW_S: i64 = 86_400;

/// Rebuilds [`FlightSession`]s from log lines
#[derive(Debug, Clone)]
pub struct Reconciler {
    relatedness_window_s: i64,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self {
            relatedness_window_s: DEFAULT_RELATEDNESS_WINDOW_S,
        }
    }
}

impl Reconciler {
    pub fn new(config: &ReconcilerConfig) -> Self {
        Self {
            relatedness_window_s: config.relatedness_window_s,
        }
    }

    pub fn relatedness_window_s(&self) -> i64 {
        self.relatedness_window_s
    }

    /// Read and reconcile the log at `path`, most recent session first.
    ///
    /// A missing or unreadable log yields no sessions.
    #[instrument(name = "reconcile_file", skip(self, path), fields(path = %path.display()))]
    pub fn reconcile_file(&self, path: &Path) -> Vec<FlightSession> {
        match read_log_lines(path) {
            Ok(lines) => self.reconcile(lines.as_slice()),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read flight log");
                Vec::new()
            }
        }
    }

    /// Reconcile raw lines in file order, most recent session first.
    ///
    /// Lines that do not parse are skipped.
    pub fn reconcile<S: AsRef<str>>(&self, lines: &[S]) -> Vec<FlightSession> {
        let records = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| match parse_line(line.as_ref()) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(line = index + 1, error = %e, "Skipping log line");
                    observability::record_line_rejected(e.reason());
                    None
                }
            });

        let sessions = self.reconcile_records(records);
        observability::record_reconciliation(lines.len(), sessions.len());
        sessions
    }

    /// Fold already parsed records, most recent session first
    pub fn reconcile_records<I>(&self, records: I) -> Vec<FlightSession>
    where
        I: IntoIterator<Item = EventRecord>,
    {
        let mut pending: Option<FlightSession> = None;
        let mut sessions = Vec::new();

        for record in records {
            match record.kind {
                EventKind::Start => {
                    sessions.extend(pending.take());
                    pending = Some(start_session(record));
                }
                EventKind::Landing => {
                    let session = match pending.take() {
                        Some(open) if self.is_related(&open, &record) => {
                            absorb_landing(open, record)
                        }
                        Some(open) => {
                            sessions.push(open);
                            landing_only_session(record)
                        }
                        None => landing_only_session(record),
                    };
                    sessions.push(session);
                }
            }
        }
        sessions.extend(pending);

        sessions.reverse();
        sessions
    }

    /// Same origin, and the landing is no later than the window after the
    /// start. A start time that cannot be converted does not separate them.
    fn is_related(&self, open: &FlightSession, landing: &EventRecord) -> bool {
        if open.origin != landing.origin {
            return false;
        }
        let Some(start) = open.start.as_ref() else {
            return true;
        };
        if !start.time.is_plausible() {
            return true;
        }
        match landing.timestamp.seconds_since(&start.time) {
            Some(elapsed) => elapsed <= self.relatedness_window_s,
            None => true,
        }
    }
}

fn session_end(record: &mut EventRecord) -> SessionEnd {
    SessionEnd {
        time: record.timestamp,
        location: record.location,
        place: record.place.take(),
    }
}

fn start_session(mut record: EventRecord) -> FlightSession {
    let start = session_end(&mut record);
    FlightSession {
        origin: record.origin,
        identity: record.identity,
        start: Some(start),
        landing: None,
    }
}

/// Identity stays the one recorded at the start
fn absorb_landing(mut open: FlightSession, mut record: EventRecord) -> FlightSession {
    open.landing = Some(session_end(&mut record));
    open
}

/// Start-less session that takes its identity from the landing line
fn landing_only_session(mut record: EventRecord) -> FlightSession {
    let landing = session_end(&mut record);
    FlightSession {
        origin: record.origin,
        identity: record.identity,
        start: None,
        landing: Some(landing),
    }
}
