//! Seed cities offered by the city picker, and lookups over them.

use geo::{Distance, Haversine, Point};
use serde::Serialize;

use crate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeedCity {
    pub name: &'static str,
    pub location: Coordinate,
}

const fn city(name: &'static str, lat: f64, lon: f64) -> SeedCity {
    SeedCity {
        name,
        location: Coordinate::new(lat, lon),
    }
}

pub const SEED_CITIES: &[SeedCity] = &[
    city("Delhi", 28.6139, 77.2090),
    city("Mumbai", 19.0760, 72.8777),
    city("Bengaluru", 12.9716, 77.5946),
    city("Kolkata", 22.5726, 88.3639),
    city("Chennai", 13.0827, 80.2707),
    city("Hyderabad", 17.3850, 78.4867),
    city("Pune", 18.5204, 73.8567),
    city("Ahmedabad", 23.0225, 72.5714),
    city("Jaipur", 26.9124, 75.7873),
    city("Lucknow", 26.8467, 80.9462),
];

/// Map center used when the caller supplies none (Delhi).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(28.6139, 77.2090);

/// Finds a seed city by name, ignoring ASCII case and surrounding space.
#[must_use]
pub fn lookup_city(name: &str) -> Option<&'static SeedCity> {
    let name = name.trim();
    SEED_CITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// A seed city together with its great-circle distance from a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMatch {
    #[serde(flatten)]
    pub city: SeedCity,
    pub distance_meters: f64,
}

/// Returns the seed city closest to `at` by haversine distance.
///
/// `None` only if `at` is not finite.
#[must_use]
pub fn nearest_city(at: Coordinate) -> Option<CityMatch> {
    if !(at.lat.is_finite() && at.lon.is_finite()) {
        return None;
    }

    let origin = Point::new(at.lon, at.lat);
    SEED_CITIES
        .iter()
        .map(|city| CityMatch {
            city: *city,
            distance_meters: Haversine.distance(
                origin,
                Point::new(city.location.lon, city.location.lat),
            ),
        })
        .min_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters))
}
