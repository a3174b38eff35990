#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AQI health-risk categories and the breakpoint table that defines them.
//!
//! This crate owns the single breakpoint table shared by every consumer
//! that needs to turn an AQI number into a category: the textual advisory
//! path and the map visualization path both classify through
//! [`BreakpointTable::classify`], so color and label can never drift
//! between them. The older map boundaries are still reachable through
//! [`BreakpointSet::LegacyMap`] for callers that need them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Health-risk category for an AQI reading.
///
/// The six defined categories partition `[0, inf)`. [`AqiCategory::Unknown`]
/// is reserved for a missing reading and never produced from a number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AqiCategory {
    /// Air quality is satisfactory.
    Good,
    /// Acceptable; unusually sensitive people may be affected.
    Moderate,
    /// Children, the elderly, and people with lung disease are at risk.
    UnhealthyForSensitive,
    /// Everyone may begin to experience health effects.
    Unhealthy,
    /// Health warnings for the whole population.
    VeryUnhealthy,
    /// Emergency conditions.
    Hazardous,
    /// No reading available.
    Unknown,
}

impl AqiCategory {
    /// Returns the ordinal severity (0 = Good .. 5 = Hazardous), or `None`
    /// for [`AqiCategory::Unknown`].
    #[must_use]
    pub const fn severity_rank(self) -> Option<u8> {
        match self {
            Self::Good => Some(0),
            Self::Moderate => Some(1),
            Self::UnhealthyForSensitive => Some(2),
            Self::Unhealthy => Some(3),
            Self::VeryUnhealthy => Some(4),
            Self::Hazardous => Some(5),
            Self::Unknown => None,
        }
    }

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
            Self::Unknown => "Unknown",
        }
    }

    /// Headline shown above an advisory.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Good => "Good Air Quality",
            Self::Moderate => "Moderate Air Quality",
            Self::UnhealthyForSensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy Air Quality",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous Air Quality",
            Self::Unknown => "No data available.",
        }
    }

    /// One-line legend description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Good => "Air quality is satisfactory",
            Self::Moderate => "Sensitive people may experience minor issues",
            Self::UnhealthyForSensitive => "Children and elderly should limit outdoor activity",
            Self::Unhealthy => "Everyone may experience health effects",
            Self::VeryUnhealthy => "Health warnings for everyone",
            Self::Hazardous => "Emergency conditions",
            Self::Unknown => "Check back later for updates",
        }
    }

    /// Presentation color token (CSS hex).
    #[must_use]
    pub const fn color_token(self) -> &'static str {
        match self {
            Self::Good => "#28a745",
            Self::Moderate => "#ffc107",
            Self::UnhealthyForSensitive => "#fd7e14",
            Self::Unhealthy => "#dc3545",
            Self::VeryUnhealthy => "#6f42c1",
            Self::Hazardous => "#6c757d",
            Self::Unknown => "#666666",
        }
    }

    /// Presentation glyph.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Good => "😊",
            Self::Moderate => "😐",
            Self::UnhealthyForSensitive | Self::Unhealthy => "😷",
            Self::VeryUnhealthy => "😰",
            Self::Hazardous => "😱",
            Self::Unknown => "❓",
        }
    }

    /// Returns the six defined categories in ascending severity.
    #[must_use]
    pub const fn defined() -> &'static [Self] {
        &[
            Self::Good,
            Self::Moderate,
            Self::UnhealthyForSensitive,
            Self::Unhealthy,
            Self::VeryUnhealthy,
            Self::Hazardous,
        ]
    }
}

/// One range on the AQI axis. The range covers everything above the
/// previous breakpoint's bound up to and including `upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Inclusive upper bound. The terminal range uses `f64::INFINITY`.
    pub upper_bound: f64,
    /// Category assigned to values in this range.
    pub category: AqiCategory,
}

const fn bp(upper_bound: f64, category: AqiCategory) -> Breakpoint {
    Breakpoint {
        upper_bound,
        category,
    }
}

static STANDARD_BREAKPOINTS: [Breakpoint; 6] = [
    bp(50.0, AqiCategory::Good),
    bp(100.0, AqiCategory::Moderate),
    bp(150.0, AqiCategory::UnhealthyForSensitive),
    bp(200.0, AqiCategory::Unhealthy),
    bp(300.0, AqiCategory::VeryUnhealthy),
    bp(f64::INFINITY, AqiCategory::Hazardous),
];

static LEGACY_MAP_BREAKPOINTS: [Breakpoint; 6] = [
    bp(50.0, AqiCategory::Good),
    bp(100.0, AqiCategory::Moderate),
    bp(200.0, AqiCategory::UnhealthyForSensitive),
    bp(300.0, AqiCategory::Unhealthy),
    bp(400.0, AqiCategory::VeryUnhealthy),
    bp(f64::INFINITY, AqiCategory::Hazardous),
];

/// Selects which boundary set a [`BreakpointTable`] uses.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BreakpointSet {
    /// 50 / 100 / 150 / 200 / 300.
    #[default]
    Standard,
    /// 50 / 100 / 200 / 300 / 400, as the old map markers used.
    LegacyMap,
}

/// The breakpoint table. Cheap to copy; holds a reference to static data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointTable {
    set: BreakpointSet,
    breakpoints: &'static [Breakpoint; 6],
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::new(BreakpointSet::Standard)
    }
}

impl BreakpointTable {
    /// Builds the table for the given boundary set.
    #[must_use]
    pub fn new(set: BreakpointSet) -> Self {
        let breakpoints = match set {
            BreakpointSet::Standard => &STANDARD_BREAKPOINTS,
            BreakpointSet::LegacyMap => &LEGACY_MAP_BREAKPOINTS,
        };
        Self { set, breakpoints }
    }

    /// The boundary set this table was built from.
    #[must_use]
    pub const fn set(&self) -> BreakpointSet {
        self.set
    }

    /// The ranges in ascending order.
    #[must_use]
    pub const fn breakpoints(&self) -> &'static [Breakpoint; 6] {
        self.breakpoints
    }

    /// Maps a numeric AQI to its category.
    ///
    /// Negative values (including negative infinity) clamp to
    /// [`AqiCategory::Good`]; `NaN` is treated as a missing reading.
    #[must_use]
    pub fn category_for(&self, aqi: f64) -> AqiCategory {
        if aqi.is_nan() {
            log::warn!("AQI reading is NaN, treating it as missing");
            return AqiCategory::Unknown;
        }
        self.breakpoints
            .iter()
            .find(|b| aqi <= b.upper_bound)
            .map_or(AqiCategory::Hazardous, |b| b.category)
    }

    /// Classifies an optional AQI reading into a full [`CategoryRecord`].
    #[must_use]
    pub fn classify(&self, aqi: Option<f64>) -> CategoryRecord {
        let category = aqi.map_or(AqiCategory::Unknown, |v| self.category_for(v));
        self.record(category)
    }

    /// Builds the presentation record for a category under this table.
    #[must_use]
    pub fn record(&self, category: AqiCategory) -> CategoryRecord {
        CategoryRecord {
            category,
            label: category.label(),
            severity_rank: category.severity_rank(),
            color_token: category.color_token(),
            glyph: category.glyph(),
            headline: category.headline(),
            description: category.description(),
            range: self.range_label(category),
        }
    }

    /// Inclusive numeric range of a category, `None` for Unknown. The
    /// terminal range's upper end is `f64::INFINITY`.
    #[must_use]
    pub fn range_of(&self, category: AqiCategory) -> Option<(f64, f64)> {
        let idx = self
            .breakpoints
            .iter()
            .position(|b| b.category == category)?;
        let lower = if idx == 0 {
            0.0
        } else {
            self.breakpoints[idx - 1].upper_bound
        };
        Some((lower, self.breakpoints[idx].upper_bound))
    }

    /// Legend text such as `"51-100"` or `"300+"`.
    #[must_use]
    pub fn range_label(&self, category: AqiCategory) -> Option<String> {
        let idx = self
            .breakpoints
            .iter()
            .position(|b| b.category == category)?;
        let upper = self.breakpoints[idx].upper_bound;
        if idx == 0 {
            return Some(format!("0-{upper:.0}"));
        }
        let prev = self.breakpoints[idx - 1].upper_bound;
        if upper.is_infinite() {
            Some(format!("{prev:.0}+"))
        } else {
            Some(format!("{:.0}-{upper:.0}", prev + 1.0))
        }
    }
}

/// Classifies an AQI reading with the standard table.
#[must_use]
pub fn classify(aqi: Option<f64>) -> CategoryRecord {
    BreakpointTable::default().classify(aqi)
}

/// A category together with its presentation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// The category.
    pub category: AqiCategory,
    /// Short human-readable label.
    pub label: &'static str,
    /// Ordinal 0-5, `None` for Unknown.
    pub severity_rank: Option<u8>,
    /// CSS color token.
    pub color_token: &'static str,
    /// Glyph shown next to the label.
    pub glyph: &'static str,
    /// Advisory headline.
    pub headline: &'static str,
    /// Legend description.
    pub description: &'static str,
    /// Legend range (e.g. `"101-150"`), `None` for Unknown.
    pub range: Option<String>,
}

/// A validated AQI reading: finite and non-negative.
///
/// The classifier itself is lenient; this type is for callers that would
/// rather reject bad readings up front.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AqiValue(f64);

impl AqiValue {
    /// Validates a raw reading.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAqiError`] if the value is negative, `NaN`, or
    /// infinite.
    pub fn new(value: f64) -> Result<Self, InvalidAqiError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidAqiError { value })
        }
    }

    /// Returns the raw number.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for AqiValue {
    type Error = InvalidAqiError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error returned when an AQI reading is negative or not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidAqiError {
    /// The rejected value.
    pub value: f64,
}

impl std::fmt::Display for InvalidAqiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid AQI value {}: expected a finite, non-negative number",
            self.value
        )
    }
}

impl std::error::Error for InvalidAqiError {}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn boundaries_belong_to_lower_category() {
        assert_eq!(classify(Some(0.0)).category, AqiCategory::Good);
        assert_eq!(classify(Some(50.0)).category, AqiCategory::Good);
        assert_eq!(classify(Some(51.0)).category, AqiCategory::Moderate);
        assert_eq!(classify(Some(100.0)).category, AqiCategory::Moderate);
        assert_eq!(
            classify(Some(100.5)).category,
            AqiCategory::UnhealthyForSensitive
        );
        assert_eq!(
            classify(Some(150.0)).category,
            AqiCategory::UnhealthyForSensitive
        );
        assert_eq!(classify(Some(151.0)).category, AqiCategory::Unhealthy);
        assert_eq!(classify(Some(200.0)).category, AqiCategory::Unhealthy);
        assert_eq!(classify(Some(201.0)).category, AqiCategory::VeryUnhealthy);
        assert_eq!(classify(Some(300.0)).category, AqiCategory::VeryUnhealthy);
        assert_eq!(classify(Some(301.0)).category, AqiCategory::Hazardous);
        assert_eq!(classify(Some(9_999.0)).category, AqiCategory::Hazardous);
    }

    #[test]
    fn severity_is_monotonic() {
        for set in [BreakpointSet::Standard, BreakpointSet::LegacyMap] {
            let table = BreakpointTable::new(set);
            let mut last = 0u8;
            for tenth in 0..6_000u32 {
                let aqi = f64::from(tenth) / 10.0;
                let rank = table.classify(Some(aqi)).severity_rank.unwrap();
                assert!(rank >= last, "{set}: rank dropped at {aqi}");
                last = rank;
            }
            assert_eq!(last, 5);
        }
    }

    #[test]
    fn missing_reading_is_unknown() {
        let record = classify(None);
        assert_eq!(record.category, AqiCategory::Unknown);
        assert_eq!(record.severity_rank, None);
        assert_eq!(record.color_token, "#666666");
        assert_eq!(record.range, None);
    }

    #[test]
    fn nan_is_unknown_and_negative_clamps() {
        assert_eq!(classify(Some(f64::NAN)).category, AqiCategory::Unknown);
        assert_eq!(classify(Some(-12.0)).category, AqiCategory::Good);
        assert_eq!(
            classify(Some(f64::NEG_INFINITY)).category,
            AqiCategory::Good
        );
        assert_eq!(classify(Some(f64::INFINITY)).category, AqiCategory::Hazardous);
    }

    #[test]
    fn legacy_map_boundaries() {
        let table = BreakpointTable::new(BreakpointSet::LegacyMap);
        assert_eq!(
            table.category_for(180.0),
            AqiCategory::UnhealthyForSensitive
        );
        assert_eq!(table.category_for(250.0), AqiCategory::Unhealthy);
        assert_eq!(table.category_for(350.0), AqiCategory::VeryUnhealthy);
        assert_eq!(table.category_for(401.0), AqiCategory::Hazardous);
    }

    #[test]
    fn range_labels_follow_table() {
        let table = BreakpointTable::default();
        assert_eq!(table.range_label(AqiCategory::Good).unwrap(), "0-50");
        assert_eq!(table.range_label(AqiCategory::Moderate).unwrap(), "51-100");
        assert_eq!(table.range_label(AqiCategory::Hazardous).unwrap(), "300+");

        let legacy = BreakpointTable::new(BreakpointSet::LegacyMap);
        assert_eq!(
            legacy.range_label(AqiCategory::UnhealthyForSensitive).unwrap(),
            "101-200"
        );
        assert_eq!(legacy.range_of(AqiCategory::Good), Some((0.0, 50.0)));
    }

    #[test]
    fn every_defined_category_has_a_rank() {
        for (i, cat) in AqiCategory::defined().iter().enumerate() {
            assert_eq!(cat.severity_rank(), Some(u8::try_from(i).unwrap()));
        }
    }

    #[test]
    fn aqi_value_rejects_bad_readings() {
        assert!(AqiValue::new(42.0).is_ok());
        assert!(AqiValue::new(0.0).is_ok());
        assert!(AqiValue::new(-1.0).is_err());
        assert!(AqiValue::new(f64::NAN).is_err());
        assert!(AqiValue::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn breakpoint_set_parses() {
        assert_eq!(
            BreakpointSet::from_str("legacy_map").unwrap(),
            BreakpointSet::LegacyMap
        );
        assert_eq!(BreakpointSet::default().to_string(), "standard");
        assert_eq!(
            AqiCategory::from_str("VERY_UNHEALTHY").unwrap(),
            AqiCategory::VeryUnhealthy
        );
    }
}
