//! # Detector
//!
//! Live takeoff/landing detection.
//!
//! Responsibilities:
//! - Debounce and discontinuity handling of the telemetry clock
//! - Two-latch hysteresis: a transition needs a full round-trip through the
//!   opposite state before it is confirmed
//! - Building `EventRecord`s (identity, nearest place) and appending them to
//!   an `EventSink`, never failing the tick loop
//!
//! ## Example
//!
//! ```ignore
//! use detector::{FlightLogger, PlaceIndex};
//!
//! let mut logger = FlightLogger::new(&config.detector, writer, config.identity.clone(),
//!     PlaceIndex::from_config(&config.places));
//!
//! for sample in telemetry {
//!     logger.tick(&sample);
//! }
//! ```

mod engine;
mod logger;
mod places;

pub use engine::{DetectedEvent, FlightDetector, Latch, TickResult};
pub use logger::{FlightLogger, TickReport, DEFAULT_SEARCH_RADIUS_M};
pub use places::PlaceIndex;

pub use contracts::{DetectorConfig, TelemetrySample, TickOutcome};
