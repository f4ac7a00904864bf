//! Log line codec
//!
//! Current layout, one event per line:
//!
//! ```text
//! <timestamp>,<kind>,<origin>,<pilot>,<type>,<registration>,<competition>,<lat>,<lon>,<place>
//! ```
//!
//! Older logs carry `YYYY-MM-DDTHH:MM:SS start` (or `landing`) as the first
//! column, with no kind or origin columns; the identity columns follow
//! directly.

use contracts::{
    truncate_chars, EventKind, EventRecord, GeoPoint, Identity, Origin, Timestamp,
    PLACE_NAME_MAX,
};
use tracing::debug;

use crate::error::LineError;

/// Byte offset of the space that marks a legacy first column
const LEGACY_MARKER_INDEX: usize = 19;

/// Kind, origin and the seven detail columns after the timestamp
const CURRENT_FIELDS: usize = 10;

/// First-pass split of a raw line, before any field is interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawLine<'a> {
    /// `YYYY-MM-DDTHH:MM:SS start,...`
    Legacy {
        /// Date-time part of the first column with the trailing `Z` restored
        timestamp: String,
        kind: EventKind,
        details: Vec<&'a str>,
    },
    /// `timestamp,kind,origin,...`
    Current {
        timestamp: &'a str,
        kind: &'a str,
        origin: &'a str,
        details: Vec<&'a str>,
    },
}

impl<'a> RawLine<'a> {
    /// Decide which layout `line` uses and split it into columns
    pub fn classify(line: &'a str) -> Result<Self, LineError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(LineError::Empty);
        }

        let (first, rest) = match line.split_once(',') {
            Some((first, rest)) => (first, Some(rest)),
            None => (line, None),
        };

        if first.as_bytes().get(LEGACY_MARKER_INDEX) == Some(&b' ') {
            let kind = match first.as_bytes().get(LEGACY_MARKER_INDEX + 1) {
                Some(b's') => EventKind::Start,
                _ => EventKind::Landing,
            };
            let details = rest
                .map(|r| r.splitn(CURRENT_FIELDS - 3, ',').collect())
                .unwrap_or_default();

            return Ok(Self::Legacy {
                timestamp: format!("{}Z", &first[..LEGACY_MARKER_INDEX]),
                kind,
                details,
            });
        }

        let fields: Vec<&str> = line.splitn(CURRENT_FIELDS, ',').collect();
        if fields.len() < 3 {
            return Err(LineError::TooFewFields {
                expected: 3,
                found: fields.len(),
            });
        }

        Ok(Self::Current {
            timestamp: fields[0],
            kind: fields[1],
            origin: fields[2],
            details: fields[3..].to_vec(),
        })
    }

    /// Interpret the columns
    pub fn into_record(self) -> Result<EventRecord, LineError> {
        let (timestamp, kind, origin, details) = match self {
            Self::Legacy {
                timestamp,
                kind,
                details,
            } => (Timestamp::parse(&timestamp)?, kind, Origin::Real, details),
            Self::Current {
                timestamp,
                kind,
                origin,
                details,
            } => {
                let timestamp = Timestamp::parse(timestamp)?;
                let kind = single_char(kind)
                    .and_then(EventKind::from_char)
                    .ok_or_else(|| LineError::UnknownKind(kind.to_string()))?;
                let origin = single_char(origin)
                    .and_then(Origin::from_char)
                    .ok_or_else(|| LineError::UnknownOrigin(origin.to_string()))?;
                (timestamp, kind, origin, details)
            }
        };

        let column = |i: usize| details.get(i).copied().unwrap_or("");

        let identity = Identity {
            pilot_name: column(0).to_string(),
            vehicle_type: column(1).to_string(),
            vehicle_registration: column(2).to_string(),
            competition_id: column(3).to_string(),
        }
        .bounded();

        let location = parse_location(column(4), column(5));

        let place = match column(6).trim_end() {
            "" => None,
            name => Some(truncate_chars(name, PLACE_NAME_MAX)),
        };

        Ok(EventRecord {
            timestamp,
            kind,
            origin,
            identity,
            location,
            place,
        })
    }
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_location(latitude: &str, longitude: &str) -> Option<GeoPoint> {
    if latitude.is_empty() && longitude.is_empty() {
        return None;
    }
    let point = GeoPoint::parse_pair(latitude, longitude);
    if point.is_none() {
        debug!(latitude, longitude, "Ignoring unparseable location");
    }
    point
}

/// Parse one log line in either layout
pub fn parse_line(line: &str) -> Result<EventRecord, LineError> {
    RawLine::classify(line)?.into_record()
}

/// Render `record` as one line in the current layout, without the newline.
///
/// Commas and line breaks inside free-text columns are replaced by spaces so
/// the line always splits back into the same columns.
pub fn format_line(record: &EventRecord) -> String {
    let identity = record.identity.bounded();
    let (latitude, longitude) = match record.location.filter(GeoPoint::is_valid) {
        Some(point) => (point.format_latitude(), point.format_longitude()),
        None => (String::new(), String::new()),
    };
    let place = record
        .place
        .as_deref()
        .map(|p| truncate_chars(p, PLACE_NAME_MAX))
        .unwrap_or_default();

    format!(
        "{},{},{},{},{},{},{},{},{},{}",
        record.timestamp,
        record.kind.as_char(),
        record.origin.as_char(),
        sanitize(&identity.pilot_name),
        sanitize(&identity.vehicle_type),
        sanitize(&identity.vehicle_registration),
        sanitize(&identity.competition_id),
        latitude,
        longitude,
        sanitize(&place),
    )
}

fn sanitize(field: &str) -> String {
    field.replace([',', '\r', '\n'], " ")
}
