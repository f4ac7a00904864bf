//! Collaborators consulted when an event is emitted.

use crate::{GeoPoint, Identity};

/// Supplies the pilot/vehicle identity current at emission time
pub trait IdentityProvider {
    fn identity(&self) -> Identity;
}

impl IdentityProvider for Identity {
    fn identity(&self) -> Identity {
        self.clone()
    }
}

/// Best-effort nearest named place lookup.
///
/// Must return promptly; `None` means nothing was found within the radius
/// (or the lookup is unavailable).
pub trait PlaceResolver {
    fn nearest(&self, location: &GeoPoint, radius_m: f64) -> Option<String>;
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlaces;

impl PlaceResolver for NoPlaces {
    fn nearest(&self, _location: &GeoPoint, _radius_m: f64) -> Option<String> {
        None
    }
}
