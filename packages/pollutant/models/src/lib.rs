#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pollutant labels and per-pollutant sub-index maps.
//!
//! Upstream feeds spell pollutants in many ways (`PM 2.5`, `pm25`,
//! `O3`, `nitrogen_dioxide`, ...). Everything is normalized into the
//! canonical [`Pollutant`] set via [`normalize_label`] before any lookup
//! happens, and labels outside the set are dropped rather than rejected.

pub mod normalize;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

pub use normalize::{UnknownPollutantError, normalize_label};

/// A pollutant tracked by the index.
///
/// Declaration order is the canonical order: it decides iteration order of
/// [`SubIndices`] and breaks ties in [`SubIndices::dominant`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
pub enum Pollutant {
    /// Fine particulate matter.
    #[serde(rename = "PM2.5")]
    #[strum(serialize = "PM2.5")]
    Pm25,
    /// Coarse particulate matter.
    #[serde(rename = "PM10")]
    #[strum(serialize = "PM10")]
    Pm10,
    /// Nitrogen dioxide.
    #[serde(rename = "NO2")]
    #[strum(serialize = "NO2")]
    No2,
    /// Sulfur dioxide.
    #[serde(rename = "SO2")]
    #[strum(serialize = "SO2")]
    So2,
    /// Ground-level ozone.
    #[serde(rename = "OZONE")]
    #[strum(serialize = "OZONE")]
    Ozone,
    /// Carbon monoxide.
    #[serde(rename = "CO")]
    #[strum(serialize = "CO")]
    Co,
    /// Ammonia.
    #[serde(rename = "NH3")]
    #[strum(serialize = "NH3")]
    Nh3,
}

impl Pollutant {
    /// Returns all variants in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pm25,
            Self::Pm10,
            Self::No2,
            Self::So2,
            Self::Ozone,
            Self::Co,
            Self::Nh3,
        ]
    }

    /// The source family this pollutant belongs to.
    #[must_use]
    pub const fn family(self) -> PollutantFamily {
        match self {
            Self::Pm25 | Self::Pm10 => PollutantFamily::Particulate,
            Self::No2 | Self::So2 => PollutantFamily::Combustion,
            Self::Ozone => PollutantFamily::Photochemical,
            Self::Co | Self::Nh3 => PollutantFamily::Other,
        }
    }

    /// Concentration unit the feeds report this pollutant in.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Co => "mg/m³",
            _ => "μg/m³",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Pm25 => "Fine particulate matter - particles smaller than 2.5 micrometers",
            Self::Pm10 => "Coarse particulate matter - particles smaller than 10 micrometers",
            Self::No2 => "Nitrogen dioxide - primarily from vehicle emissions",
            Self::So2 => "Sulfur dioxide - from industrial processes and power plants",
            Self::Ozone => "Ground-level ozone - formed by chemical reactions",
            Self::Co => "Carbon monoxide - from incomplete combustion",
            Self::Nh3 => "Ammonia - from agricultural activities and vehicles",
        }
    }

    /// Presentation color token (CSS hex).
    #[must_use]
    pub const fn color_token(self) -> &'static str {
        match self {
            Self::Pm25 => "#3b82f6",
            Self::Pm10 => "#8b5cf6",
            Self::No2 => "#f59e0b",
            Self::So2 => "#ef4444",
            Self::Ozone => "#10b981",
            Self::Co => "#6b7280",
            Self::Nh3 => "#f97316",
        }
    }

    /// Presentation glyph.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Pm25 => "🌫️",
            Self::Pm10 => "💨",
            Self::No2 => "🚗",
            Self::So2 => "🏭",
            Self::Ozone => "☀️",
            Self::Co => "🔥",
            Self::Nh3 => "🌾",
        }
    }

    /// Bundles the presentation metadata into one serializable record.
    #[must_use]
    pub const fn info(self) -> PollutantInfo {
        PollutantInfo {
            pollutant: self,
            family: self.family(),
            unit: self.unit(),
            description: self.description(),
            color_token: self.color_token(),
            glyph: self.glyph(),
        }
    }
}

impl std::str::FromStr for Pollutant {
    type Err = UnknownPollutantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_label(s).ok_or_else(|| UnknownPollutantError {
            label: s.to_string(),
        })
    }
}

/// Groups pollutants by where they come from. Mitigation advice is keyed
/// by family, not by individual pollutant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PollutantFamily {
    /// PM2.5 and PM10.
    Particulate,
    /// NO2 and SO2: traffic and industrial combustion.
    Combustion,
    /// Ozone.
    Photochemical,
    /// Everything without dedicated advice.
    Other,
}

/// Presentation metadata for a pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantInfo {
    /// The pollutant.
    pub pollutant: Pollutant,
    /// Source family.
    pub family: PollutantFamily,
    /// Concentration unit.
    pub unit: &'static str,
    /// Description.
    pub description: &'static str,
    /// CSS color token.
    pub color_token: &'static str,
    /// Glyph.
    pub glyph: &'static str,
}

/// Per-pollutant AQI sub-indices.
///
/// The overall AQI is the maximum sub-index, and the pollutant holding it
/// is the dominant pollutant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubIndices(BTreeMap<Pollutant, f64>);

impl SubIndices {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builds a map from raw `(label, value)` pairs as they arrive from the
    /// API. Unrecognized labels, missing values, and non-finite values are
    /// skipped.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<f64>)>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (label, value) in raw {
            let label = label.as_ref();
            let Some(pollutant) = normalize_label(label) else {
                log::debug!("Dropping sub-index for unrecognized pollutant label {label:?}");
                continue;
            };
            match value {
                Some(v) if v.is_finite() => {
                    map.insert(pollutant, v);
                }
                _ => log::debug!("Dropping empty sub-index for {pollutant}"),
            }
        }
        Self(map)
    }

    /// Sets the sub-index for a pollutant, returning the previous value.
    pub fn insert(&mut self, pollutant: Pollutant, value: f64) -> Option<f64> {
        self.0.insert(pollutant, value)
    }

    /// Sub-index for a pollutant.
    #[must_use]
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.0.get(&pollutant).copied()
    }

    /// Number of pollutants present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no sub-indices are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in canonical pollutant order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    /// The pollutant with the highest sub-index. Ties go to the pollutant
    /// that comes first in canonical order.
    #[must_use]
    pub fn dominant(&self) -> Option<Pollutant> {
        let mut best: Option<(Pollutant, f64)> = None;
        for (pollutant, value) in self.iter() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((pollutant, value)),
            }
        }
        best.map(|(p, _)| p)
    }

    /// Overall AQI: the maximum sub-index.
    #[must_use]
    pub fn overall_aqi(&self) -> Option<f64> {
        self.0.values().copied().reduce(f64::max)
    }
}

impl FromIterator<(Pollutant, f64)> for SubIndices {
    fn from_iter<T: IntoIterator<Item = (Pollutant, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_grouping() {
        assert_eq!(Pollutant::Pm25.family(), PollutantFamily::Particulate);
        assert_eq!(Pollutant::Pm10.family(), PollutantFamily::Particulate);
        assert_eq!(Pollutant::No2.family(), PollutantFamily::Combustion);
        assert_eq!(Pollutant::So2.family(), PollutantFamily::Combustion);
        assert_eq!(Pollutant::Ozone.family(), PollutantFamily::Photochemical);
        assert_eq!(Pollutant::Co.family(), PollutantFamily::Other);
        assert_eq!(Pollutant::Nh3.family(), PollutantFamily::Other);
    }

    #[test]
    fn display_uses_canonical_label() {
        assert_eq!(Pollutant::Pm25.to_string(), "PM2.5");
        assert_eq!(Pollutant::Ozone.to_string(), "OZONE");
        assert_eq!(
            serde_json::to_string(&Pollutant::Pm25).unwrap(),
            "\"PM2.5\""
        );
    }

    #[test]
    fn dominant_is_max_sub_index() {
        let subs = SubIndices::from_raw([
            ("PM2.5", Some(75.0)),
            ("PM10", Some(65.0)),
            ("NO2", Some(45.0)),
        ]);
        assert_eq!(subs.dominant(), Some(Pollutant::Pm25));
        assert_eq!(subs.overall_aqi(), Some(75.0));
    }

    #[test]
    fn dominant_tie_goes_to_canonical_order() {
        let subs: SubIndices = [(Pollutant::Ozone, 120.0), (Pollutant::No2, 120.0)]
            .into_iter()
            .collect();
        assert_eq!(subs.dominant(), Some(Pollutant::No2));
    }

    #[test]
    fn empty_map_has_no_dominant() {
        let subs = SubIndices::new();
        assert!(subs.is_empty());
        assert_eq!(subs.dominant(), None);
        assert_eq!(subs.overall_aqi(), None);
    }

    #[test]
    fn from_raw_skips_unknown_and_missing() {
        let subs = SubIndices::from_raw([
            ("pm25", Some(80.0)),
            ("benzene", Some(300.0)),
            ("O3", None),
            ("SO2", Some(f64::NAN)),
            ("nitrogen_dioxide", Some(90.0)),
        ]);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs.get(Pollutant::Pm25), Some(80.0));
        assert_eq!(subs.get(Pollutant::No2), Some(90.0));
        assert_eq!(subs.dominant(), Some(Pollutant::No2));
    }

    #[test]
    fn sub_indices_serialize_as_label_map() {
        let subs: SubIndices = [(Pollutant::Pm10, 65.0), (Pollutant::Pm25, 75.0)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&subs).unwrap();
        assert_eq!(json, serde_json::json!({"PM2.5": 75.0, "PM10": 65.0}));
    }

    #[test]
    fn info_carries_metadata() {
        let info = Pollutant::Co.info();
        assert_eq!(info.unit, "mg/m³");
        assert_eq!(info.family, PollutantFamily::Other);
        assert!(info.description.starts_with("Carbon monoxide"));
    }
}
