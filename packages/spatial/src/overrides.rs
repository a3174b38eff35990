//! Fixed point lists for specific map centers.
//!
//! An override replaces randomized synthesis for one center. Centers are
//! matched after rounding both coordinates to two decimal places (roughly
//! 1 km), so small jitter in a geolocated center still hits the entry.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{Coordinate, GeoPoint, PointKind};

/// A center rounded to hundredths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoordinateKey {
    lat_centi: i32,
    lon_centi: i32,
}

impl From<Coordinate> for CoordinateKey {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: Coordinate) -> Self {
        Self {
            lat_centi: (value.lat * 100.0).round() as i32,
            lon_centi: (value.lon * 100.0).round() as i32,
        }
    }
}

/// One configured override: a center and the literal points to emit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverrideEntry {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub points: Vec<GeoPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTable {
    entries: BTreeMap<CoordinateKey, Vec<GeoPoint>>,
}

impl OverrideTable {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in Delhi fixture used for demos.
    #[must_use]
    pub fn demo() -> Self {
        let mut table = Self::empty();
        table.insert(crate::cities::DEFAULT_CENTER, delhi_demo_points());
        table
    }

    /// Adds or replaces the entry for `center`. Returns the replaced list.
    pub fn insert(&mut self, center: Coordinate, points: Vec<GeoPoint>) -> Option<Vec<GeoPoint>> {
        self.entries.insert(center.into(), points)
    }

    pub fn extend_from_entries<'a>(&mut self, entries: impl IntoIterator<Item = &'a OverrideEntry>) {
        for entry in entries {
            let center = Coordinate::new(entry.lat, entry.lon);
            if self.insert(center, entry.points.clone()).is_some() {
                log::debug!("override for ({}, {}) replaced an earlier entry", entry.lat, entry.lon);
            }
        }
    }

    #[must_use]
    pub fn lookup(&self, center: Coordinate) -> Option<&[GeoPoint]> {
        self.entries.get(&center.into()).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn delhi_demo_points() -> Vec<GeoPoint> {
    use PointKind::{Hotspot, Safezone};

    vec![
        GeoPoint::new(28.6469, 77.3152, 286.0, 450.0, Hotspot),
        GeoPoint::new(28.6289, 77.2405, 231.0, 380.0, Hotspot),
        GeoPoint::new(28.6683, 77.1167, 204.0, 420.0, Hotspot),
        GeoPoint::new(28.5494, 77.2001, 172.0, 320.0, Hotspot),
        GeoPoint::new(28.5931, 77.2197, 64.0, 260.0, Safezone),
        GeoPoint::new(28.5815, 77.1856, 71.0, 230.0, Safezone),
        GeoPoint::new(28.6129, 77.2295, 78.0, 300.0, Safezone),
    ]
}
