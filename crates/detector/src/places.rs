//! Named place index for nearest-place lookups.

use contracts::{GeoPoint, PlaceConfig, PlaceResolver, PlacesConfig};

/// In-memory list of named places.
///
/// Built from the `[places]` config section. Lookups are a linear haversine
/// scan, which is plenty for a personal waypoint list.
#[derive(Debug, Clone, Default)]
pub struct PlaceIndex {
    places: Vec<PlaceConfig>,
}

impl PlaceIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the configured entries
    pub fn from_config(config: &PlacesConfig) -> Self {
        let places: Vec<PlaceConfig> = config
            .entries
            .iter()
            .filter(|p| p.location().is_valid())
            .cloned()
            .collect();

        tracing::debug!(count = places.len(), "Built place index");

        Self { places }
    }

    /// Closest place within `radius_m`, if any
    pub fn nearest_place(&self, location: &GeoPoint, radius_m: f64) -> Option<&PlaceConfig> {
        self.places
            .iter()
            .map(|p| (p, p.location().distance_m(location)))
            .filter(|(_, d)| *d <= radius_m)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }

    /// Returns the number of places in the index.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl PlaceResolver for PlaceIndex {
    fn nearest(&self, location: &GeoPoint, radius_m: f64) -> Option<String> {
        self.nearest_place(location, radius_m).map(|p| p.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> PlaceIndex {
        PlaceIndex::from_config(&PlacesConfig {
            search_radius_m: 1000.0,
            entries: vec![
                PlaceConfig {
                    name: "North Strip".into(),
                    latitude: 47.0050,
                    longitude: 8.0,
                },
                PlaceConfig {
                    name: "Home Field".into(),
                    latitude: 47.0,
                    longitude: 8.0,
                },
                PlaceConfig {
                    name: "Broken".into(),
                    latitude: 200.0,
                    longitude: 8.0,
                },
            ],
        })
    }

    #[test]
    fn test_invalid_entries_are_skipped() {
        assert_eq!(index().len(), 2);
        assert!(PlaceIndex::new().is_empty());
    }

    #[test]
    fn test_nearest_within_radius() {
        let index = index();
        let here = GeoPoint::new(47.0010, 8.0);
        assert_eq!(index.nearest(&here, 1000.0).as_deref(), Some("Home Field"));

        let near_north = GeoPoint::new(47.0045, 8.0);
        assert_eq!(
            index.nearest(&near_north, 1000.0).as_deref(),
            Some("North Strip")
        );
    }

    #[test]
    fn test_nothing_outside_radius() {
        let index = index();
        let far = GeoPoint::new(47.1, 8.0);
        assert_eq!(index.nearest(&far, 1000.0), None);
        assert!(PlaceIndex::new().nearest(&far, 1e9).is_none());
    }
}
