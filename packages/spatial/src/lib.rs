#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic spatial risk points.
//!
//! There is no sensor network behind the map, so hotspots and safe zones
//! are derived from the forecast: high readings become hotspots, low
//! readings become safe zones, each placed at an evenly spaced bearing and
//! a random distance from the map center. Points are recomputed on every
//! call and carry no geographic meaning beyond illustrating spread.

pub mod cities;
pub mod overrides;
pub mod random;

use aqi_map_forecast_models::ForecastPoint;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use cities::{CityMatch, DEFAULT_CENTER, SEED_CITIES, SeedCity, lookup_city, nearest_city};
pub use overrides::{CoordinateKey, OverrideEntry, OverrideTable};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};

/// Smallest radius a synthesized point is given.
pub const MIN_RADIUS_METERS: f64 = 1.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Whether a map point marks elevated or clean air.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PointKind {
    /// Area of elevated AQI.
    Hotspot,
    /// Area of comparatively clean air.
    Safezone,
}

/// A circle drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Circle center latitude.
    pub lat: f64,
    /// Circle center longitude.
    pub lon: f64,
    /// AQI shown for the circle.
    pub aqi: f64,
    /// Circle radius. Always positive for synthesized points.
    #[serde(alias = "radius_meters")]
    pub radius_meters: f64,
    /// Hotspot or safe zone.
    pub kind: PointKind,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lon: f64, aqi: f64, radius_meters: f64, kind: PointKind) -> Self {
        Self {
            lat,
            lon,
            aqi,
            radius_meters,
            kind,
        }
    }
}

/// A uniform band `[min, min + span)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    /// Lower end, inclusive.
    pub min: f64,
    /// Width of the band.
    pub span: f64,
}

impl Band {
    #[must_use]
    pub const fn new(min: f64, span: f64) -> Self {
        Self { min, span }
    }

    /// Exclusive upper end.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.min + self.span
    }

    /// Maps a unit sample `r` in `[0, 1)` into the band.
    #[must_use]
    pub fn sample(&self, r: f64) -> f64 {
        self.span.mul_add(r, self.min)
    }
}

/// Placement rules for one point kind.
///
/// When read from configuration, any key left out keeps the kind's
/// default (see [`KindRules::hotspot`] and [`KindRules::safezone`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KindRules {
    /// Hotspots take readings strictly above this, safe zones strictly
    /// below.
    pub threshold: f64,
    /// Cap on points of this kind per call.
    pub max_points: usize,
    /// Bearing increment between successive points.
    pub angle_step_degrees: f64,
    /// Radial distance from the center, in degrees.
    pub distance_degrees: Band,
    /// Band the displayed AQI is re-sampled from.
    pub aqi: Band,
    /// Circle radius band.
    pub radius_meters: Band,
}

impl KindRules {
    /// Default hotspot rules.
    #[must_use]
    pub const fn hotspot() -> Self {
        Self {
            threshold: 120.0,
            max_points: 4,
            angle_step_degrees: 90.0,
            distance_degrees: Band::new(0.01, 0.02),
            aqi: Band::new(120.0, 80.0),
            radius_meters: Band::new(300.0, 200.0),
        }
    }

    /// Default safe-zone rules.
    #[must_use]
    pub const fn safezone() -> Self {
        Self {
            threshold: 80.0,
            max_points: 3,
            angle_step_degrees: 120.0,
            distance_degrees: Band::new(0.015, 0.025),
            aqi: Band::new(30.0, 40.0),
            radius_meters: Band::new(200.0, 150.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct PartialBand {
    min: Option<f64>,
    span: Option<f64>,
}

impl PartialBand {
    fn fill(self, base: Band) -> Band {
        Band {
            min: self.min.unwrap_or(base.min),
            span: self.span.unwrap_or(base.span),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct PartialKindRules {
    threshold: Option<f64>,
    max_points: Option<usize>,
    angle_step_degrees: Option<f64>,
    distance_degrees: Option<PartialBand>,
    aqi: Option<PartialBand>,
    radius_meters: Option<PartialBand>,
}

impl PartialKindRules {
    fn fill(self, base: KindRules) -> KindRules {
        let band = |partial: Option<PartialBand>, base: Band| partial.map_or(base, |p| p.fill(base));
        KindRules {
            threshold: self.threshold.unwrap_or(base.threshold),
            max_points: self.max_points.unwrap_or(base.max_points),
            angle_step_degrees: self.angle_step_degrees.unwrap_or(base.angle_step_degrees),
            distance_degrees: band(self.distance_degrees, base.distance_degrees),
            aqi: band(self.aqi, base.aqi),
            radius_meters: band(self.radius_meters, base.radius_meters),
        }
    }
}

fn deserialize_hotspot<'de, D>(deserializer: D) -> Result<KindRules, D::Error>
where
    D: serde::Deserializer<'de>,
{
    PartialKindRules::deserialize(deserializer).map(|p| p.fill(KindRules::hotspot()))
}

fn deserialize_safezone<'de, D>(deserializer: D) -> Result<KindRules, D::Error>
where
    D: serde::Deserializer<'de>,
{
    PartialKindRules::deserialize(deserializer).map(|p| p.fill(KindRules::safezone()))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Rules for high-AQI points.
    #[serde(deserialize_with = "deserialize_hotspot")]
    pub hotspot: KindRules,
    /// Rules for low-AQI points.
    #[serde(deserialize_with = "deserialize_safezone")]
    pub safezone: KindRules,
    /// Seed the override table with the built-in Delhi fixture.
    pub use_demo_overrides: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            hotspot: KindRules::hotspot(),
            safezone: KindRules::safezone(),
            use_demo_overrides: false,
        }
    }
}

impl SynthesisConfig {
    /// Rules for `kind`.
    #[must_use]
    pub const fn rules(&self, kind: PointKind) -> &KindRules {
        match kind {
            PointKind::Hotspot => &self.hotspot,
            PointKind::Safezone => &self.safezone,
        }
    }
}

impl PointKind {
    fn admits(self, aqi: f64, rules: &KindRules) -> bool {
        match self {
            Self::Hotspot => aqi > rules.threshold,
            Self::Safezone => aqi < rules.threshold,
        }
    }
}

/// Produces map points for `center` from a forecast series.
///
/// An override entry for `center` is returned verbatim without consuming
/// randomness. Otherwise hotspots are emitted first, then safe zones, each
/// drawing distance, AQI and radius from `rng` in that order. Non-finite
/// readings never qualify.
#[must_use]
pub fn synthesize<R: RandomSource + ?Sized>(
    center: Coordinate,
    series: &[ForecastPoint],
    overrides: Option<&OverrideTable>,
    config: &SynthesisConfig,
    rng: &mut R,
) -> Vec<GeoPoint> {
    if let Some(points) = overrides.and_then(|table| table.lookup(center)) {
        log::debug!(
            "override hit for ({}, {}): {} points",
            center.lat,
            center.lon,
            points.len()
        );
        return points.to_vec();
    }

    let mut points = Vec::new();
    for kind in [PointKind::Hotspot, PointKind::Safezone] {
        let rules = config.rules(kind);
        let qualifying = series
            .iter()
            .filter(|p| kind.admits(p.aqi, rules))
            .take(rules.max_points);

        for (index, _) in qualifying.enumerate() {
            points.push(place(center, kind, rules, index, rng));
        }
    }

    log::debug!(
        "synthesized {} points from {} forecast readings",
        points.len(),
        series.len()
    );
    points
}

#[allow(clippy::cast_precision_loss)]
fn place<R: RandomSource + ?Sized>(
    center: Coordinate,
    kind: PointKind,
    rules: &KindRules,
    index: usize,
    rng: &mut R,
) -> GeoPoint {
    let angle = (index as f64 * rules.angle_step_degrees).to_radians();
    let distance = rules.distance_degrees.sample(rng.next_f64());
    let aqi = rules.aqi.sample(rng.next_f64());
    let radius = rules
        .radius_meters
        .sample(rng.next_f64())
        .max(MIN_RADIUS_METERS);

    GeoPoint {
        lat: distance.mul_add(angle.cos(), center.lat),
        lon: distance.mul_add(angle.sin(), center.lon),
        aqi,
        radius_meters: radius,
        kind,
    }
}
