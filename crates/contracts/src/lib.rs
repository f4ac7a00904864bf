//! # Contracts
//!
//! Frozen interface contracts shared by every crate of the flight logbook.
//! Business crates depend on this crate only, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Telemetry carries a monotonic GPS clock (seconds, f64) used for
//!   debounce and discontinuity checks
//! - Events are stamped with the broken-down UTC wall clock ([`Timestamp`]),
//!   which is what lands in the log file

mod config;
mod error;
mod event;
mod geo;
mod provider;
mod session;
mod sink;
mod telemetry;
mod time;

pub use config::*;
pub use error::*;
pub use event::*;
pub use geo::GeoPoint;
pub use provider::{IdentityProvider, NoPlaces, PlaceResolver};
pub use session::{FlightSession, SessionEnd};
pub use sink::EventSink;
pub use telemetry::{TelemetrySample, TickOutcome};
pub use time::{ParseTimestampError, Timestamp};
