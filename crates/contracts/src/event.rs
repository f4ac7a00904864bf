//! EventRecord - the atomic unit appended to the flight log
//!
//! Written once by the log writer, read many times by the reconciler.
//! There is no update or delete.

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, Timestamp};

/// Confirmed transition kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Start,
    Landing,
}

impl EventKind {
    /// Single character code used in the log
    pub fn as_char(self) -> char {
        match self {
            Self::Start => 's',
            Self::Landing => 'l',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Start),
            'l' => Some(Self::Landing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Landing => "landing",
        }
    }
}

/// Whether the event came from a real flight or a simulator session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Real,
    Simulated,
}

impl Origin {
    /// Single character code used in the log
    pub fn as_char(self) -> char {
        match self {
            Self::Real => 'R',
            Self::Simulated => 'S',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'R' => Some(Self::Real),
            'S' => Some(Self::Simulated),
            _ => None,
        }
    }

    pub fn is_simulated(self) -> bool {
        self == Self::Simulated
    }
}

/// Pilot and vehicle identity as configured at emission time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub pilot_name: String,
    pub vehicle_type: String,
    pub vehicle_registration: String,
    pub competition_id: String,
}

impl Identity {
    /// Maximum pilot name length (characters)
    pub const PILOT_NAME_MAX: usize = 19;
    /// Maximum vehicle type length (characters)
    pub const VEHICLE_TYPE_MAX: usize = 31;
    /// Maximum registration length (characters)
    pub const REGISTRATION_MAX: usize = 31;
    /// Maximum competition id length (characters)
    pub const COMPETITION_ID_MAX: usize = 5;

    /// Copy with every field cut to its bound
    pub fn bounded(&self) -> Self {
        Self {
            pilot_name: truncate_chars(&self.pilot_name, Self::PILOT_NAME_MAX),
            vehicle_type: truncate_chars(&self.vehicle_type, Self::VEHICLE_TYPE_MAX),
            vehicle_registration: truncate_chars(
                &self.vehicle_registration,
                Self::REGISTRATION_MAX,
            ),
            competition_id: truncate_chars(&self.competition_id, Self::COMPETITION_ID_MAX),
        }
    }

    /// `(name, value, max)` triples, used by config validation
    pub fn fields(&self) -> [(&'static str, &str, usize); 4] {
        [
            ("pilot_name", &self.pilot_name, Self::PILOT_NAME_MAX),
            ("vehicle_type", &self.vehicle_type, Self::VEHICLE_TYPE_MAX),
            (
                "vehicle_registration",
                &self.vehicle_registration,
                Self::REGISTRATION_MAX,
            ),
            ("competition_id", &self.competition_id, Self::COMPETITION_ID_MAX),
        ]
    }
}

/// Maximum nearest-place name length (characters)
pub const PLACE_NAME_MAX: usize = 49;

/// Keep at most `max` characters of `s`
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// One takeoff or landing, exactly as it is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: Timestamp,
    pub kind: EventKind,
    pub origin: Origin,
    pub identity: Identity,
    /// Takeoff location for starts, landing location for landings
    pub location: Option<GeoPoint>,
    /// Nearest named place, if the lookup found one
    pub place: Option<String>,
}

impl EventRecord {
    /// Bare record without identity, location or place
    pub fn new(timestamp: Timestamp, kind: EventKind, origin: Origin) -> Self {
        Self {
            timestamp,
            kind,
            origin,
            identity: Identity::default(),
            location: None,
            place: None,
        }
    }
}
