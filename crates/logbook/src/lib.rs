//! # Logbook
//!
//! Rebuilds flight sessions from the event log and renders them for listing.
//!
//! ```ignore
//! use logbook::{Reconciler, SessionSummary};
//!
//! let sessions = Reconciler::default().reconcile_file("flights.log".as_ref());
//! for session in &sessions {
//!     println!("{}", SessionSummary::from_session(session));
//! }
//! ```

mod reconciler;
mod summary;

pub use reconciler::{Reconciler, DEFAULT_RELATEDNESS_WINDOW_S};
pub use summary::SessionSummary;
