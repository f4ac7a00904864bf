//! Takeoff/landing state machine.
//!
//! A transition is only confirmed after a full round-trip through the
//! opposite condition: the vehicle must have been seen clearly on the ground
//! before a start counts, and clearly flying before a landing counts. Single
//! noisy samples in between never emit anything.

use contracts::{
    DetectorConfig, EventKind, GeoPoint, TelemetrySample, TickOutcome, Timestamp,
};
use tracing::{debug, instrument, trace};

/// Which condition has been observed since the last reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latch {
    /// Nothing observed yet
    #[default]
    Idle,
    /// Seen clearly on the ground; waiting to confirm a takeoff
    SeenOnGround,
    /// Seen clearly flying; waiting to confirm a landing
    SeenFlying,
}

/// Confirmed transition, before identity and place are attached
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedEvent {
    pub kind: EventKind,
    pub timestamp: Timestamp,
    pub location: Option<GeoPoint>,
}

/// Result of feeding one sample
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    pub event: Option<DetectedEvent>,
}

impl TickResult {
    fn quiet(outcome: TickOutcome) -> Self {
        Self {
            outcome,
            event: None,
        }
    }
}

/// Live takeoff/landing detector
///
/// One instance per telemetry session, driven by the tick loop.
#[derive(Debug, Clone)]
pub struct FlightDetector {
    discontinuity_threshold_s: f64,
    debounce_s: f64,
    /// Time of the last accepted sample; `None` until a baseline exists
    last_time: Option<f64>,
    latch: Latch,
    pending_start: Option<Timestamp>,
    pending_landing: Option<Timestamp>,
}

impl Default for FlightDetector {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}

impl FlightDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            discontinuity_threshold_s: config.discontinuity_threshold_s,
            debounce_s: config.debounce_s,
            last_time: None,
            latch: Latch::Idle,
            pending_start: None,
            pending_landing: None,
        }
    }

    /// Forget latches and pending transitions (the baseline is kept)
    pub fn reset(&mut self) {
        self.latch = Latch::Idle;
        self.pending_start = None;
        self.pending_landing = None;
    }

    /// Feed one telemetry sample
    #[instrument(
        level = "trace",
        name = "detector_tick",
        skip(self, sample),
        fields(time = sample.time, airborne = sample.airborne, on_ground = sample.on_ground)
    )]
    pub fn tick(&mut self, sample: &TelemetrySample) -> TickResult {
        if sample.replay
            || !sample.time_available
            || !sample.time.is_finite()
            || !sample.date_time_utc.is_date_plausible()
        {
            trace!("Sample discarded");
            return TickResult::quiet(TickOutcome::Discarded);
        }

        if let Some(last_time) = self.last_time {
            let delta = sample.time - last_time;
            if delta < 0.0 || delta > self.discontinuity_threshold_s {
                debug!(delta, latch = ?self.latch, "Time discontinuity, resetting detector");
                self.reset();
                self.last_time = Some(sample.time);
                return TickResult::quiet(TickOutcome::Reset);
            }
            if delta < self.debounce_s {
                return TickResult::quiet(TickOutcome::Debounced);
            }
        }

        let event = self.detect(sample);
        self.last_time = Some(sample.time);

        TickResult {
            outcome: TickOutcome::Processed,
            event,
        }
    }

    fn detect(&mut self, sample: &TelemetrySample) -> Option<DetectedEvent> {
        let mut event = None;

        if self.latch == Latch::SeenOnGround && sample.airborne {
            self.pending_start = Some(sample.date_time_utc);

            if !sample.on_ground {
                self.latch = Latch::Idle;
                event = self.pending_start.take().map(|timestamp| DetectedEvent {
                    kind: EventKind::Start,
                    timestamp,
                    location: sample.takeoff_location,
                });
            }
        }

        if self.latch == Latch::SeenFlying && sample.on_ground {
            self.pending_landing = Some(sample.date_time_utc);

            if !sample.airborne {
                self.latch = Latch::Idle;
                event = self.pending_landing.take().map(|timestamp| DetectedEvent {
                    kind: EventKind::Landing,
                    timestamp,
                    location: sample.landing_location,
                });
            }
        }

        if sample.is_clearly_flying() {
            self.latch = Latch::SeenFlying;
        } else if sample.is_clearly_on_ground() {
            self.latch = Latch::SeenOnGround;
        }

        event
    }

    pub fn latch(&self) -> Latch {
        self.latch
    }

    pub fn seen_on_ground(&self) -> bool {
        self.latch == Latch::SeenOnGround
    }

    pub fn seen_flying(&self) -> bool {
        self.latch == Latch::SeenFlying
    }

    /// Provisional takeoff time, not yet confirmed
    pub fn pending_start(&self) -> Option<Timestamp> {
        self.pending_start
    }

    /// Provisional landing time, not yet confirmed
    pub fn pending_landing(&self) -> Option<Timestamp> {
        self.pending_landing
    }

    /// Time of the last accepted sample
    pub fn last_sample_time(&self) -> Option<f64> {
        self.last_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(hour: u32, minute: u32, second: u32) -> Timestamp {
        Timestamp::new(2024, 5, 1, hour, minute, second)
    }

    fn ground(time: f64) -> TelemetrySample {
        TelemetrySample::new(time, clock(time), false, true)
    }

    fn flying(time: f64) -> TelemetrySample {
        TelemetrySample::new(time, clock(time), true, false)
    }

    fn ambiguous(time: f64) -> TelemetrySample {
        TelemetrySample::new(time, clock(time), true, true)
    }

    /// Wall clock that follows the GPS clock, starting at 10:00:00
    fn clock(time: f64) -> Timestamp {
        let secs = time as u32;
        ts(10 + secs / 3600, (secs / 60) % 60, secs % 60)
    }

    fn events(detector: &mut FlightDetector, samples: &[TelemetrySample]) -> Vec<DetectedEvent> {
        samples
            .iter()
            .filter_map(|s| detector.tick(s).event)
            .collect()
    }

    #[test]
    fn test_takeoff_and_landing() {
        let mut detector = FlightDetector::default();
        let mut samples = vec![ground(1.0), ground(2.0), ambiguous(3.0), flying(4.0)];
        samples.extend([flying(60.0), ambiguous(120.0), ground(121.0)]);

        let events = events(&mut detector, &samples);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Start);
        assert_eq!(events[0].timestamp, ts(10, 0, 4));
        assert_eq!(events[1].kind, EventKind::Landing);
        assert_eq!(events[1].timestamp, ts(10, 2, 1));
        assert!(detector.seen_on_ground());
    }

    #[test]
    fn test_same_tick_confirmation() {
        let mut detector = FlightDetector::default();
        detector.tick(&ground(1.0));
        let result = detector.tick(&flying(2.0));
        assert_eq!(result.outcome, TickOutcome::Processed);
        let event = result.event.unwrap();
        assert_eq!(event.kind, EventKind::Start);
        assert_eq!(detector.pending_start(), None);
        assert!(detector.seen_flying());
    }

    #[test]
    fn test_ambiguous_sample_holds_pending_start() {
        let mut detector = FlightDetector::default();
        detector.tick(&ground(1.0));
        let result = detector.tick(&ambiguous(2.0));
        assert!(result.event.is_none());
        assert_eq!(detector.pending_start(), Some(ts(10, 0, 2)));
        assert!(detector.seen_on_ground());
    }

    #[test]
    fn test_first_flying_sample_does_not_start() {
        let mut detector = FlightDetector::default();
        let events = events(&mut detector, &[flying(1.0), flying(2.0)]);
        assert!(events.is_empty());
        assert!(detector.seen_flying());
    }

    #[test]
    fn test_debounce_leaves_state_untouched() {
        let mut detector = FlightDetector::default();
        detector.tick(&ground(10.0));
        detector.tick(&ambiguous(11.0));
        let latch = detector.latch();
        let pending = detector.pending_start();

        let result = detector.tick(&flying(11.4));
        assert_eq!(result.outcome, TickOutcome::Debounced);
        assert!(result.event.is_none());
        assert_eq!(detector.latch(), latch);
        assert_eq!(detector.pending_start(), pending);
        assert_eq!(detector.last_sample_time(), Some(11.0));
    }

    #[test]
    fn test_debounce_boundary() {
        let mut detector = FlightDetector::default();
        detector.tick(&ground(10.0));
        assert_eq!(detector.tick(&ground(10.5)).outcome, TickOutcome::Processed);
        assert_eq!(detector.last_sample_time(), Some(10.5));
    }

    #[test]
    fn test_forward_gap_resets() {
        let mut detector = FlightDetector::default();
        detector.tick(&ground(10.0));
        detector.tick(&ambiguous(11.0));
        assert!(detector.pending_start().is_some());

        let result = detector.tick(&flying(311.5));
        assert_eq!(result.outcome, TickOutcome::Reset);
        assert!(result.event.is_none());
        assert_eq!(detector.latch(), Latch::Idle);
        assert_eq!(detector.pending_start(), None);
        assert_eq!(detector.pending_landing(), None);
        assert_eq!(detector.last_sample_time(), Some(311.5));
    }

    #[test]
    fn test_gap_of_exactly_threshold_is_processed() {
        let mut detector = FlightDetector::default();
        detector.tick(&ground(10.0));
        let result = detector.tick(&flying(310.0));
        assert_eq!(result.outcome, TickOutcome::Processed);
        assert_eq!(result.event.map(|e| e.kind), Some(EventKind::Start));
    }

    #[test]
    fn test_backward_jump_resets() {
        let mut detector = FlightDetector::default();
        detector.tick(&flying(100.0));
        detector.tick(&ambiguous(101.0));
        assert!(detector.pending_landing().is_some());

        let result = detector.tick(&ground(50.0));
        assert_eq!(result.outcome, TickOutcome::Reset);
        assert!(result.event.is_none());
        assert_eq!(detector.latch(), Latch::Idle);
        assert_eq!(detector.pending_landing(), None);
        assert_eq!(detector.last_sample_time(), Some(50.0));
    }

    #[test]
    fn test_discarded_samples() {
        let mut detector = FlightDetector::default();

        let mut replay = ground(1.0);
        replay.replay = true;
        let mut no_clock = ground(2.0);
        no_clock.time_available = false;
        let mut bad_date = ground(3.0);
        bad_date.date_time_utc = Timestamp::new(2024, 13, 1, 0, 0, 0);

        for sample in [replay, no_clock, bad_date] {
            assert_eq!(detector.tick(&sample).outcome, TickOutcome::Discarded);
        }
        assert_eq!(detector.last_sample_time(), None);
        assert_eq!(detector.latch(), Latch::Idle);
    }

    #[test]
    fn test_noise_emits_nothing() {
        let mut detector = FlightDetector::default();
        // On the ground, one sample hints "airborne" without leaving the ground
        let samples = [ground(1.0), ambiguous(2.0), ground(3.0), ground(4.0)];
        assert!(events(&mut detector, &samples).is_empty());

        // In the air, one sample hints "on ground" without the airborne flag dropping
        let mut detector = FlightDetector::default();
        let samples = [flying(1.0), ambiguous(2.0), flying(3.0), flying(4.0)];
        assert!(events(&mut detector, &samples).is_empty());
    }

    #[test]
    fn test_event_carries_relevant_location() {
        let mut detector = FlightDetector::default();
        let takeoff = GeoPoint::new(47.0, 8.0);
        let landing = GeoPoint::new(46.0, 7.0);

        let mut s1 = ground(1.0);
        s1.landing_location = Some(landing);
        let mut s2 = flying(2.0);
        s2.takeoff_location = Some(takeoff);
        s2.landing_location = Some(landing);
        let mut s3 = ground(3.0);
        s3.takeoff_location = Some(takeoff);
        s3.landing_location = Some(landing);

        let events = events(&mut detector, &[s1, s2, s3]);
        assert_eq!(events[0].location, Some(takeoff));
        assert_eq!(events[1].location, Some(landing));
    }
}
