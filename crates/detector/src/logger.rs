//! FlightLogger - drives the detector and persists confirmed events.
//!
//! Emission failures are swallowed: losing one log line is preferable to
//! disturbing the telemetry tick loop.

use contracts::{
    truncate_chars, DetectorConfig, EventRecord, EventSink, IdentityProvider, Origin,
    PlaceResolver, TelemetrySample, TickOutcome, PLACE_NAME_MAX,
};
use tracing::{info, warn};

use crate::engine::{DetectedEvent, FlightDetector};

/// Default nearest-place search radius (meters)
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 1000.0;

/// What happened to one sample
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Record built for a confirmed event
    pub record: Option<EventRecord>,
    /// Whether the sink accepted `record`
    pub written: bool,
}

/// Session-scoped detector plus its emission collaborators
pub struct FlightLogger<S, I, P> {
    detector: FlightDetector,
    sink: S,
    identity: I,
    places: P,
    origin: Origin,
    search_radius_m: f64,
}

impl<S, I, P> FlightLogger<S, I, P>
where
    S: EventSink,
    I: IdentityProvider,
    P: PlaceResolver,
{
    pub fn new(config: &DetectorConfig, sink: S, identity: I, places: P) -> Self {
        Self {
            detector: FlightDetector::new(config),
            sink,
            identity,
            places,
            origin: config.origin(),
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
        }
    }

    /// Override the nearest-place search radius
    pub fn with_search_radius(mut self, radius_m: f64) -> Self {
        self.search_radius_m = radius_m;
        self
    }

    /// Feed one sample; persists the event if one was confirmed
    pub fn tick(&mut self, sample: &TelemetrySample) -> TickReport {
        let result = self.detector.tick(sample);
        observability::record_tick(result.outcome);

        let Some(event) = result.event else {
            return TickReport {
                outcome: result.outcome,
                record: None,
                written: false,
            };
        };

        observability::record_event_detected(event.kind);
        let record = self.build_record(event);
        let written = self.persist(&record);

        TickReport {
            outcome: result.outcome,
            record: Some(record),
            written,
        }
    }

    fn build_record(&self, event: DetectedEvent) -> EventRecord {
        let location = event.location.filter(|l| l.is_valid());
        let place = location
            .as_ref()
            .and_then(|l| self.places.nearest(l, self.search_radius_m))
            .map(|name| truncate_chars(&name, PLACE_NAME_MAX));

        EventRecord {
            timestamp: event.timestamp,
            kind: event.kind,
            origin: self.origin,
            identity: self.identity.identity(),
            location,
            place,
        }
    }

    fn persist(&mut self, record: &EventRecord) -> bool {
        match self.sink.append(record) {
            Ok(()) => {
                info!(
                    sink = %self.sink.name(),
                    kind = record.kind.as_str(),
                    timestamp = %record.timestamp,
                    place = record.place.as_deref().unwrap_or(""),
                    "Flight event logged"
                );
                observability::record_log_write(self.sink.name(), true);
                true
            }
            Err(e) => {
                warn!(
                    sink = %self.sink.name(),
                    kind = record.kind.as_str(),
                    timestamp = %record.timestamp,
                    error = %e,
                    "Flight event dropped"
                );
                observability::record_log_write(self.sink.name(), false);
                false
            }
        }
    }

    pub fn detector(&self) -> &FlightDetector {
        &self.detector
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
