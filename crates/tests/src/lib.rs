//! # Integration Tests
//!
//! Cross-crate tests:
//! - configuration to running detector
//! - live detection written to a real log file and folded back into sessions
//! - mixed legacy/current logs

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{FlightLogConfig, Timestamp};

    #[test]
    fn test_empty_config_is_valid() {
        let config = ConfigLoader::load_from_str("", ConfigFormat::Toml).unwrap();
        assert_eq!(config.detector.discontinuity_threshold_s, 300.0);
        assert_eq!(config.reconciler.relatedness_window_s, 86_400);
    }

    #[test]
    fn test_default_config_survives_toml() {
        let toml = ConfigLoader::to_toml(&FlightLogConfig::default()).unwrap();
        let config = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.log.path, FlightLogConfig::default().log.path);
    }

    #[test]
    fn test_timestamp_text_form() {
        let t = Timestamp::new(2024, 5, 1, 10, 0, 0);
        assert_eq!(t.to_string(), "2024-05-01T10:00:00Z");
        assert_eq!(Timestamp::parse(&t.to_string()).unwrap(), t);
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{EventKind, GeoPoint, Origin, TelemetrySample, Timestamp};
    use detector::{FlightLogger, PlaceIndex};
    use flight_log::FlightLogWriter;
    use logbook::{Reconciler, SessionSummary};
    use std::fs;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
[identity]
pilot_name = "Alice"
vehicle_type = "Glider"
vehicle_registration = "AB-123"

[places]
search_radius_m = 1000.0

[[places.entries]]
name = "Home Field"
latitude = 47.0
longitude = 8.0
"#;

    const HOME: GeoPoint = GeoPoint::new(47.0005, 8.0);
    const AWAY: GeoPoint = GeoPoint::new(47.5, 8.5);

    fn sample(time: f64, minute: u32, airborne: bool, on_ground: bool) -> TelemetrySample {
        let mut s = TelemetrySample::new(
            time,
            Timestamp::new(2024, 5, 1, 10 + minute / 60, minute % 60, 0),
            airborne,
            on_ground,
        );
        s.takeoff_location = Some(HOME);
        s.landing_location = Some(AWAY);
        s
    }

    /// One flight every 60 s of telemetry: ground, air, air, ground
    fn flight(start_time: f64, start_minute: u32) -> Vec<TelemetrySample> {
        vec![
            sample(start_time, start_minute, false, true),
            sample(start_time + 60.0, start_minute + 1, true, false),
            sample(start_time + 120.0, start_minute + 2, true, false),
            sample(start_time + 180.0, start_minute + 3, false, true),
        ]
    }

    #[test]
    fn test_detect_write_reconcile() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("flights.log");
        let config = ConfigLoader::load_from_str(CONFIG, ConfigFormat::Toml).unwrap();

        let mut logger = FlightLogger::new(
            &config.detector,
            FlightLogWriter::new(&log),
            config.identity.clone(),
            PlaceIndex::from_config(&config.places),
        )
        .with_search_radius(config.places.search_radius_m);

        let mut samples = flight(0.0, 0);
        samples.extend(flight(240.0, 4));
        let written: Vec<_> = samples
            .iter()
            .filter_map(|s| logger.tick(s).record)
            .collect();
        assert_eq!(written.len(), 4);

        let content = fs::read_to_string(&log).unwrap();
        assert_eq!(content.lines().count(), 4);
        assert!(content.lines().next().unwrap().contains(",s,R,Alice,Glider,AB-123,"));

        let sessions = Reconciler::new(&config.reconciler).reconcile_file(&log);
        assert_eq!(sessions.len(), 2);

        // most recent first
        let latest = &sessions[0];
        assert_eq!(latest.origin, Origin::Real);
        assert_eq!(latest.identity.pilot_name, "Alice");
        let start = latest.start.as_ref().unwrap();
        let landing = latest.landing.as_ref().unwrap();
        assert_eq!(start.time, Timestamp::new(2024, 5, 1, 10, 5, 0));
        assert_eq!(start.place.as_deref(), Some("Home Field"));
        assert_eq!(landing.place, None);
        assert!(landing.location.unwrap().distance_m(&AWAY) < 20.0);
        assert_eq!(latest.duration_seconds(), Some(120));

        let summary = SessionSummary::from_session(latest);
        assert_eq!(summary.duration, "00:02");
        assert_eq!(summary.route, "Home Field - (047.5000N,008.5000E)");
    }

    #[test]
    fn test_simulator_mode_round_trips_origin() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("flights.log");
        let config = ConfigLoader::load_from_str(
            "[detector]\nsimulator_mode = true\n",
            ConfigFormat::Toml,
        )
        .unwrap();

        let mut logger = FlightLogger::new(
            &config.detector,
            FlightLogWriter::new(&log),
            config.identity.clone(),
            PlaceIndex::from_config(&config.places),
        );
        for s in flight(0.0, 0) {
            logger.tick(&s);
        }

        let sessions = Reconciler::default().reconcile_file(&log);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].origin, Origin::Simulated);
        assert!(SessionSummary::from_session(&sessions[0]).simulated);
    }

    #[test]
    fn test_clock_jump_splits_detection() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("flights.log");
        let config = ConfigLoader::load_from_str("", ConfigFormat::Toml).unwrap();
        let mut logger = FlightLogger::new(
            &config.detector,
            FlightLogWriter::new(&log),
            config.identity.clone(),
            PlaceIndex::new(),
        );

        // takeoff, then the clock jumps past the reset threshold while flying
        logger.tick(&sample(0.0, 0, false, true));
        logger.tick(&sample(60.0, 1, true, false));
        logger.tick(&sample(1000.0, 20, true, false));
        logger.tick(&sample(1060.0, 21, false, true));

        let records: Vec<_> = fs::read_to_string(&log)
            .unwrap()
            .lines()
            .map(|l| flight_log::parse_line(l).unwrap().kind)
            .collect();
        // the reset forgets the flying latch, so no landing is confirmed
        assert_eq!(records, vec![EventKind::Start]);
    }
}

#[cfg(test)]
mod legacy_tests {
    use contracts::{Origin, Timestamp};
    use logbook::Reconciler;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_mixed_log_file() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("flights.log");
        fs::write(
            &log,
            concat!(
                "2024-04-30T08:00:00 start\n",
                "2024-04-30T09:15:00 landing\n",
                "2024-05-01T10:00:00 start\n",
                "2024-05-01T12:30:00Z,l,R,Alice,Glider,AB-123,,047.0000N,008.0000E,Home Field\n",
                "\n",
                "this line is noise\n",
                "2024-05-02T07:00:00Z,l,S,Bob,,,,,,\n",
            ),
        )
        .unwrap();

        let sessions = Reconciler::default().reconcile_file(&log);
        assert_eq!(sessions.len(), 3);

        // landing-only simulated session keeps the landing line identity
        assert_eq!(sessions[0].origin, Origin::Simulated);
        assert!(sessions[0].start.is_none());
        assert_eq!(sessions[0].identity.pilot_name, "Bob");

        // legacy start + current landing fold into one
        assert_eq!(
            sessions[1].start.as_ref().map(|s| s.time),
            Some(Timestamp::new(2024, 5, 1, 10, 0, 0))
        );
        assert_eq!(sessions[1].duration_seconds(), Some(9000));

        // pure legacy pair
        assert_eq!(sessions[2].duration_seconds(), Some(4500));
    }
}
