//! FlightSession - reconstructed pairing of a start and a landing
//!
//! Derived on every reconciliation pass, never persisted. Either side may
//! be missing: a flight can still be in progress, its start can predate the
//! log, or the matching line may have been discarded.

use serde::{Deserialize, Serialize};

use crate::{GeoPoint, Identity, Origin, Timestamp};

/// One side (start or landing) of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnd {
    pub time: Timestamp,
    pub location: Option<GeoPoint>,
    pub place: Option<String>,
}

/// One flight attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSession {
    pub origin: Origin,
    pub identity: Identity,
    pub start: Option<SessionEnd>,
    pub landing: Option<SessionEnd>,
}

impl FlightSession {
    /// Landing minus start, in seconds, when both sides convert
    pub fn duration_seconds(&self) -> Option<i64> {
        let start = self.start.as_ref()?;
        let landing = self.landing.as_ref()?;
        landing.time.seconds_since(&start.time)
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn has_landing(&self) -> bool {
        self.landing.is_some()
    }
}
