//! SessionSummary - display text for one logbook row

use contracts::{FlightSession, SessionEnd, Timestamp};
use serde::Serialize;
use std::fmt;

const UNKNOWN_DATE: &str = "????-??-??";
const NO_TIME: &str = "no time";
const NO_DURATION: &str = "--:--";
const NO_PILOT: &str = "no pilot name";
const NO_AIRCRAFT: &str = "no plane information";

/// Pre-rendered fields of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// `YYYY-MM-DD` of the start, else of the landing
    pub date: String,
    pub start_time: String,
    pub landing_time: String,
    /// Signed `HH:MM`, or `--:--` unless both sides are known
    pub duration: String,
    pub pilot: String,
    pub aircraft: String,
    /// Start and landing locations joined with ` - `
    pub route: String,
    pub simulated: bool,
}

impl SessionSummary {
    pub fn from_session(session: &FlightSession) -> Self {
        let start = plausible_side(session.start.as_ref());
        let landing = plausible_side(session.landing.as_ref());

        let date = start
            .or(landing)
            .map(|end| {
                let t = &end.time;
                format!("{:04}-{:02}-{:02}", t.year, t.month, t.day)
            })
            .unwrap_or_else(|| UNKNOWN_DATE.to_string());

        let duration = match (start, landing) {
            (Some(s), Some(l)) => l
                .time
                .seconds_since(&s.time)
                .map(format_signed_hhmm)
                .unwrap_or_else(|| NO_DURATION.to_string()),
            _ => NO_DURATION.to_string(),
        };

        let identity = &session.identity;
        let pilot = if identity.pilot_name.is_empty() {
            NO_PILOT.to_string()
        } else {
            identity.pilot_name.clone()
        };
        let aircraft = if identity.vehicle_registration.is_empty() {
            NO_AIRCRAFT.to_string()
        } else {
            format!(
                "{}, {}, {}",
                identity.vehicle_registration, identity.competition_id, identity.vehicle_type
            )
        };

        let route = [start, landing]
            .into_iter()
            .flatten()
            .map(location_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" - ");

        Self {
            date,
            start_time: clock_text(start),
            landing_time: clock_text(landing),
            duration,
            pilot,
            aircraft,
            route,
            simulated: session.origin.is_simulated(),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sim = if self.simulated { " [SIM]" } else { "" };
        writeln!(
            f,
            "{}{}  {} - {} ({})",
            self.date, sim, self.start_time, self.landing_time, self.duration
        )?;
        write!(f, "  {}, {}", self.pilot, self.aircraft)?;
        if !self.route.is_empty() {
            write!(f, "\n  {}", self.route)?;
        }
        Ok(())
    }
}

fn plausible_side(end: Option<&SessionEnd>) -> Option<&SessionEnd> {
    end.filter(|e| e.time.is_plausible())
}

fn clock_text(end: Option<&SessionEnd>) -> String {
    match end {
        Some(SessionEnd {
            time: Timestamp {
                hour,
                minute,
                second,
                ..
            },
            ..
        }) => format!("{hour:02}:{minute:02}:{second:02}"),
        None => NO_TIME.to_string(),
    }
}

/// Place name, else `(lat,lon)`, else empty
fn location_text(end: &SessionEnd) -> String {
    if let Some(place) = end.place.as_deref().filter(|p| !p.is_empty()) {
        return place.to_string();
    }
    end.location
        .map(|p| format!("({},{})", p.format_latitude(), p.format_longitude()))
        .unwrap_or_default()
}

fn format_signed_hhmm(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{GeoPoint, Identity, Origin};

    fn end(hour: u32, minute: u32) -> SessionEnd {
        SessionEnd {
            time: Timestamp::new(2024, 5, 1, hour, minute, 0),
            location: None,
            place: None,
        }
    }

    fn session(start: Option<SessionEnd>, landing: Option<SessionEnd>) -> FlightSession {
        FlightSession {
            origin: Origin::Real,
            identity: Identity::default(),
            start,
            landing,
        }
    }

    #[test]
    fn test_full_session() {
        let mut s = session(Some(end(10, 0)), Some(end(14, 5)));
        s.identity = Identity {
            pilot_name: "Alice".into(),
            vehicle_type: "Glider".into(),
            vehicle_registration: "AB-123".into(),
            competition_id: "A1".into(),
        };
        s.start.as_mut().unwrap().place = Some("Home Field".into());
        s.landing.as_mut().unwrap().location = Some(GeoPoint::new(47.5, -8.25));

        let summary = SessionSummary::from_session(&s);
        assert_eq!(summary.date, "2024-05-01");
        assert_eq!(summary.start_time, "10:00:00");
        assert_eq!(summary.landing_time, "14:05:00");
        assert_eq!(summary.duration, "04:05");
        assert_eq!(summary.pilot, "Alice");
        assert_eq!(summary.aircraft, "AB-123, A1, Glider");
        assert_eq!(summary.route, "Home Field - (047.5000N,008.2500W)");
        assert!(!summary.simulated);

        assert_eq!(
            summary.to_string(),
            "2024-05-01  10:00:00 - 14:05:00 (04:05)\n  Alice, AB-123, A1, Glider\n  Home Field - (047.5000N,008.2500W)"
        );
    }

    #[test]
    fn test_landing_only_fallbacks() {
        let mut s = session(None, Some(end(14, 0)));
        s.origin = Origin::Simulated;

        let summary = SessionSummary::from_session(&s);
        assert_eq!(summary.date, "2024-05-01");
        assert_eq!(summary.start_time, "no time");
        assert_eq!(summary.duration, "--:--");
        assert_eq!(summary.pilot, "no pilot name");
        assert_eq!(summary.aircraft, "no plane information");
        assert_eq!(summary.route, "");
        assert!(summary.simulated);
        assert!(summary.to_string().starts_with("2024-05-01 [SIM]"));
    }

    #[test]
    fn test_implausible_times() {
        let mut bad = end(25, 0);
        bad.place = Some("Nowhere".into());
        let summary = SessionSummary::from_session(&session(Some(bad), None));
        assert_eq!(summary.date, "????-??-??");
        assert_eq!(summary.start_time, "no time");
        assert_eq!(summary.route, "");
    }

    #[test]
    fn test_negative_duration() {
        let summary = SessionSummary::from_session(&session(Some(end(14, 0)), Some(end(12, 30))));
        assert_eq!(summary.duration, "-01:30");
    }
}
