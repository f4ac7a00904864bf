//! TelemetrySample - one tick from the positioning subsystem
//!
//! `airborne` and `on_ground` are independent hints. During a transition
//! both can be true (or both false) for a few ticks.

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, Timestamp};

/// Telemetry sample consumed by the live detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Monotonic GPS clock (seconds)
    pub time: f64,

    /// Broken-down UTC wall clock of the fix
    pub date_time_utc: Timestamp,

    /// The receiver delivered a usable clock
    #[serde(default = "default_true")]
    pub time_available: bool,

    /// Fix comes from replay / dead reckoning / a simulator feed.
    ///
    /// Distinct from the record-level [`Origin`](crate::Origin): such
    /// samples bypass the detector entirely.
    #[serde(default)]
    pub replay: bool,

    /// Vehicle is flying
    pub airborne: bool,

    /// Vehicle is on the ground
    pub on_ground: bool,

    /// Where the current flight took off, if known
    #[serde(default)]
    pub takeoff_location: Option<GeoPoint>,

    /// Where the vehicle landed, if known
    #[serde(default)]
    pub landing_location: Option<GeoPoint>,
}

/// What the detector did with one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOutcome {
    /// Replay/simulated feed, no clock, or implausible date
    Discarded,
    /// Arrived too soon after the previous sample
    Debounced,
    /// Clock jumped backwards or gap too long; detector state cleared
    Reset,
    /// Ran through detection
    Processed,
}

impl TickOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discarded => "discarded",
            Self::Debounced => "debounced",
            Self::Reset => "reset",
            Self::Processed => "processed",
        }
    }
}

fn default_true() -> bool {
    true
}

impl TelemetrySample {
    /// Valid, non-replay sample without locations
    pub fn new(time: f64, date_time_utc: Timestamp, airborne: bool, on_ground: bool) -> Self {
        Self {
            time,
            date_time_utc,
            time_available: true,
            replay: false,
            airborne,
            on_ground,
            takeoff_location: None,
            landing_location: None,
        }
    }

    /// Flying and clear of the ground
    pub fn is_clearly_flying(&self) -> bool {
        self.airborne && !self.on_ground
    }

    /// On the ground and not flying
    pub fn is_clearly_on_ground(&self) -> bool {
        !self.airborne && self.on_ground
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "time": 12.5,
            "date_time_utc": "2024-05-01T10:00:00Z",
            "airborne": false,
            "on_ground": true
        }"#;
        let sample: TelemetrySample = serde_json::from_str(json).unwrap();
        assert!(sample.time_available);
        assert!(!sample.replay);
        assert!(sample.is_clearly_on_ground());
        assert_eq!(sample.takeoff_location, None);
    }
}
