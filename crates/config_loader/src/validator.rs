//! Config validation
//!
//! Rules:
//! - log path is not empty
//! - identity fields fit their bounds and contain no field/line separators
//! - 0 < debounce_s < discontinuity_threshold_s
//! - relatedness_window_s > 0
//! - search_radius_m > 0, places have a name and a valid position

use std::collections::HashSet;

use contracts::{ContractError, FlightLogConfig, GeoPoint};

/// Validate a FlightLogConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &FlightLogConfig) -> Result<(), ContractError> {
    validate_log(config)?;
    validate_identity(config)?;
    validate_detector(config)?;
    validate_reconciler(config)?;
    validate_places(config)?;
    Ok(())
}

fn validate_log(config: &FlightLogConfig) -> Result<(), ContractError> {
    if config.log.path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "log.path",
            "log path cannot be empty",
        ));
    }
    Ok(())
}

/// Identity ends up verbatim in comma-delimited log lines
fn validate_identity(config: &FlightLogConfig) -> Result<(), ContractError> {
    for (name, value, max) in config.identity.fields() {
        let len = value.chars().count();
        if len > max {
            return Err(ContractError::config_validation(
                format!("identity.{name}"),
                format!("at most {max} characters allowed, got {len}"),
            ));
        }
        if value.contains([',', '\n', '\r']) {
            return Err(ContractError::config_validation(
                format!("identity.{name}"),
                "must not contain ',' or line breaks",
            ));
        }
    }
    Ok(())
}

fn validate_detector(config: &FlightLogConfig) -> Result<(), ContractError> {
    let detector = &config.detector;

    if !(detector.debounce_s > 0.0) {
        return Err(ContractError::config_validation(
            "detector.debounce_s",
            format!("debounce_s must be > 0, got {}", detector.debounce_s),
        ));
    }

    if !(detector.discontinuity_threshold_s > detector.debounce_s) {
        return Err(ContractError::config_validation(
            "detector.debounce_s / detector.discontinuity_threshold_s",
            format!(
                "discontinuity_threshold_s ({}) must be > debounce_s ({})",
                detector.discontinuity_threshold_s, detector.debounce_s
            ),
        ));
    }

    Ok(())
}

fn validate_reconciler(config: &FlightLogConfig) -> Result<(), ContractError> {
    let window = config.reconciler.relatedness_window_s;
    if window <= 0 {
        return Err(ContractError::config_validation(
            "reconciler.relatedness_window_s",
            format!("relatedness_window_s must be > 0, got {window}"),
        ));
    }
    Ok(())
}

fn validate_places(config: &FlightLogConfig) -> Result<(), ContractError> {
    let places = &config.places;

    if !(places.search_radius_m > 0.0) {
        return Err(ContractError::config_validation(
            "places.search_radius_m",
            format!("search_radius_m must be > 0, got {}", places.search_radius_m),
        ));
    }

    let mut seen = HashSet::new();
    for (idx, place) in places.entries.iter().enumerate() {
        if place.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("places.entries[{idx}].name"),
                "place name cannot be empty",
            ));
        }
        if place.name.contains([',', '\n', '\r']) {
            return Err(ContractError::config_validation(
                format!("places.entries[{idx}].name"),
                "must not contain ',' or line breaks",
            ));
        }
        if !GeoPoint::new(place.latitude, place.longitude).is_valid() {
            return Err(ContractError::config_validation(
                format!("places.entries[{}]", place.name),
                format!(
                    "invalid position ({}, {})",
                    place.latitude, place.longitude
                ),
            ));
        }
        if !seen.insert(place.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("places.entries[name={}]", place.name),
                "duplicate place name",
            ));
        }
    }

    Ok(())
}
