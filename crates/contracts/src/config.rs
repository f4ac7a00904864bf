//! FlightLogConfig - Config Loader output
//!
//! Log location, identity, detector thresholds, reconciler policy and the
//! named places used for nearest-place lookups. Every section has defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{GeoPoint, Identity, Origin};

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete flight logbook configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightLogConfig {
    /// Config version
    pub version: ConfigVersion,

    /// Log file settings
    pub log: LogConfig,

    /// Pilot / vehicle identity stamped on new events
    pub identity: Identity,

    /// Live detector settings
    pub detector: DetectorConfig,

    /// Reconciler settings
    pub reconciler: ReconcilerConfig,

    /// Named places for nearest-place lookups
    pub places: PlacesConfig,
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path of the append-only flight log
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("flights.log"),
        }
    }
}

/// Live detector settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// A gap larger than this (or any backward jump) resets the detector
    pub discontinuity_threshold_s: f64,

    /// Samples closer than this to the previous one are ignored
    pub debounce_s: f64,

    /// Stamp emitted events as simulated
    pub simulator_mode: bool,
}

impl DetectorConfig {
    /// Origin flag written on emitted events
    pub fn origin(&self) -> Origin {
        if self.simulator_mode {
            Origin::Simulated
        } else {
            Origin::Real
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            discontinuity_threshold_s: 300.0,
            debounce_s: 0.5,
            simulator_mode: false,
        }
    }
}

/// Reconciler settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// A landing more than this many seconds after the pending start
    /// does not belong to it
    pub relatedness_window_s: i64,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            relatedness_window_s: 86_400,
        }
    }
}

/// Named places
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Lookup radius around takeoff/landing locations (meters)
    pub search_radius_m: f64,

    /// Known places
    pub entries: Vec<PlaceConfig>,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            search_radius_m: 1000.0,
            entries: Vec::new(),
        }
    }
}

/// One named place (airfield, landing site, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceConfig {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
