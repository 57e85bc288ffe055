//! Location name to coordinate lookup

use hoslog_config::{Place, RoutingConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A point as the directions service expects it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `[lon, lat]`, the order used on the wire
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<&Place> for Coordinates {
    fn from(place: &Place) -> Self {
        Self::new(place.lon, place.lat)
    }
}

/// Table-driven geocoder.
///
/// A location resolves to the first known place whose name appears in it
/// (case-insensitive). Anything unknown resolves to the fallback place.
#[derive(Debug, Clone)]
pub struct Geocoder {
    places: Vec<Place>,
    fallback: Place,
}

impl Geocoder {
    pub fn new(places: Vec<Place>, fallback: Place) -> Self {
        Self { places, fallback }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.places.clone(), config.fallback.clone())
    }

    /// The known place matching `location`, if any
    pub fn lookup(&self, location: &str) -> Option<&Place> {
        let haystack = location.to_lowercase();
        self.places
            .iter()
            .find(|p| !p.name.is_empty() && haystack.contains(&p.name.to_lowercase()))
    }

    pub fn resolve(&self, location: &str) -> Coordinates {
        match self.lookup(location) {
            Some(place) => {
                debug!(location, place = %place.name, "Resolved location");
                place.into()
            }
            None => {
                warn!(
                    location,
                    fallback = %self.fallback.name,
                    "Unknown location, using fallback coordinates"
                );
                (&self.fallback).into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geocoder() -> Geocoder {
        Geocoder::from_config(&RoutingConfig::default())
    }

    #[test]
    fn known_places_match_by_substring() {
        let g = geocoder();
        assert_eq!(
            g.resolve("Inner Harbor, Baltimore, MD 21202"),
            Coordinates::new(-76.6122, 39.2904)
        );
        assert_eq!(
            g.resolve("washington, d.c."),
            Coordinates::new(-77.0369, 38.9072)
        );
    }

    #[test]
    fn unknown_place_uses_fallback() {
        let g = Geocoder::new(vec![], Place::new("Depot", 1.5, 2.5));
        assert!(g.lookup("Nowhere, KS").is_none());
        assert_eq!(g.resolve("Nowhere, KS"), Coordinates::new(1.5, 2.5));
    }

    #[test]
    fn wire_order_is_lon_lat() {
        assert_eq!(Coordinates::new(-76.6, 39.3).as_pair(), [-76.6, 39.3]);
    }
}
