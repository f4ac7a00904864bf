//! GeoPoint - WGS84 position in decimal degrees
//!
//! The log stores each axis as `%08.4f` of the absolute value followed by a
//! hemisphere letter, e.g. `047.1234N` / `008.5000W`.

use serde::{Deserialize, Serialize};

/// Geographic position (degrees, north/east positive)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Latitude as written to the log (`047.1234N`)
    pub fn format_latitude(&self) -> String {
        format_axis(self.latitude, 'N', 'S')
    }

    /// Longitude as written to the log (`008.5000E`)
    pub fn format_longitude(&self) -> String {
        format_axis(self.longitude, 'E', 'W')
    }

    /// Inverse of the two `format_*` methods.
    ///
    /// Returns `None` if either axis is malformed or carries the wrong
    /// hemisphere letter.
    pub fn parse_pair(latitude: &str, longitude: &str) -> Option<Self> {
        let point = Self {
            latitude: parse_axis(latitude, 'N', 'S')?,
            longitude: parse_axis(longitude, 'E', 'W')?,
        };
        point.is_valid().then_some(point)
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

fn format_axis(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value.is_sign_negative() && value != 0.0 {
        negative
    } else {
        positive
    };
    format!("{:08.4}{}", value.abs(), hemisphere)
}

fn parse_axis(text: &str, positive: char, negative: char) -> Option<f64> {
    let text = text.trim();
    let hemisphere = text.chars().last()?;
    let magnitude: f64 = text[..text.len() - hemisphere.len_utf8()].parse().ok()?;
    if !magnitude.is_finite() || magnitude < 0.0 {
        return None;
    }
    match hemisphere {
        h if h == positive => Some(magnitude),
        h if h == negative => Some(-magnitude),
        _ => None,
    }
}
