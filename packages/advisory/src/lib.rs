#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Health advisories and mitigation suggestions.
//!
//! [`advise`] turns an AQI reading into protective recommendations for
//! individuals plus general pollution-reduction tips. [`suggest`] turns the
//! dominant pollutant into situational actions. The two are independent and
//! merged by the caller.

pub mod mitigation;

use aqi_map_category_models::{AqiCategory, BreakpointTable, CategoryRecord};
use serde::Serialize;

pub use mitigation::{MitigationSet, compose_actions, suggest, suggest_label};

/// Recommendations and tips for one AQI reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryBundle {
    pub category: CategoryRecord,
    /// Personal protective steps, most urgent first.
    pub recommendations: &'static [&'static str],
    /// Community and systemic actions that reduce pollution over time.
    pub reduction_tips: &'static [&'static str],
}

const GOOD: &[&str] = &[
    "Safe to go outside",
    "Enjoy outdoor activities",
    "Windows can be open",
];

const MODERATE: &[&str] = &[
    "Sensitive groups should take care",
    "Limit outdoor exercise",
    "Consider wearing a mask if sensitive",
];

const UNHEALTHY_FOR_SENSITIVE: &[&str] = &[
    "Sensitive groups should avoid outdoor activity",
    "Wear a mask if going outside",
    "Keep windows closed",
];

const UNHEALTHY: &[&str] = &[
    "Everyone should avoid outdoor activity",
    "Wear a mask if going outside",
    "Use air purifiers indoors",
];

const VERY_UNHEALTHY: &[&str] = &[
    "Avoid all outdoor activity",
    "Stay indoors with windows closed",
    "Use air purifiers",
    "Consider wearing N95 mask if going outside",
];

const HAZARDOUS: &[&str] = &[
    "Stay indoors at all times",
    "Keep all windows and doors closed",
    "Use air purifiers",
    "Avoid any outdoor activity",
];

const REDUCTION_TIPS: &[&str] = &[
    "Use public transport, carpool, or bike instead of driving alone",
    "Choose energy-efficient appliances and switch off unused devices",
    "Plant trees and support local green spaces",
    "Avoid burning waste, leaves, or crop residue",
    "Support renewable energy and advocate for clean-air policies",
    "Keep air-purifying plants indoors (Snake Plant, Peace Lily, Spider Plant)",
];

/// Protective recommendations for a category. Empty for
/// [`AqiCategory::Unknown`].
#[must_use]
pub const fn recommendations_for(category: AqiCategory) -> &'static [&'static str] {
    match category {
        AqiCategory::Good => GOOD,
        AqiCategory::Moderate => MODERATE,
        AqiCategory::UnhealthyForSensitive => UNHEALTHY_FOR_SENSITIVE,
        AqiCategory::Unhealthy => UNHEALTHY,
        AqiCategory::VeryUnhealthy => VERY_UNHEALTHY,
        AqiCategory::Hazardous => HAZARDOUS,
        AqiCategory::Unknown => &[],
    }
}

/// Pollution-reduction tips. Empty for [`AqiCategory::Unknown`].
#[must_use]
pub const fn reduction_tips_for(category: AqiCategory) -> &'static [&'static str] {
    match category {
        AqiCategory::Unknown => &[],
        _ => REDUCTION_TIPS,
    }
}

/// Builds the advisory for `aqi` using the standard breakpoint table.
#[must_use]
pub fn advise(aqi: Option<f64>) -> AdvisoryBundle {
    advise_with(&BreakpointTable::default(), aqi)
}

/// Builds the advisory for `aqi` using `table` for classification.
#[must_use]
pub fn advise_with(table: &BreakpointTable, aqi: Option<f64>) -> AdvisoryBundle {
    let category = table.classify(aqi);
    AdvisoryBundle {
        recommendations: recommendations_for(category.category),
        reduction_tips: reduction_tips_for(category.category),
        category,
    }
}

#[cfg(test)]
mod tests {
    use aqi_map_category_models::BreakpointSet;

    use super::*;

    #[test]
    fn moderate_reading_cautions_sensitive_groups() {
        let bundle = advise(Some(75.0));
        assert_eq!(bundle.category.category, AqiCategory::Moderate);
        assert!(
            bundle.recommendations[0].contains("Sensitive groups"),
            "first recommendation was {:?}",
            bundle.recommendations[0]
        );
        assert!(!bundle.reduction_tips.is_empty());
    }

    #[test]
    fn defined_readings_always_have_advice() {
        for aqi in [0.0, 50.0, 51.0, 120.0, 175.0, 250.0, 301.0, 999.0] {
            let bundle = advise(Some(aqi));
            assert!(!bundle.recommendations.is_empty(), "aqi {aqi}");
            assert!(!bundle.reduction_tips.is_empty(), "aqi {aqi}");
        }
    }

    #[test]
    fn missing_reading_has_no_advice() {
        let bundle = advise(None);
        assert_eq!(bundle.category.category, AqiCategory::Unknown);
        assert!(bundle.recommendations.is_empty());
        assert!(bundle.reduction_tips.is_empty());
    }

    #[test]
    fn recommendations_and_tips_stay_distinct() {
        for category in AqiCategory::defined() {
            let recs = recommendations_for(*category);
            let tips = reduction_tips_for(*category);
            assert!(
                recs.iter().all(|r| !tips.contains(r)),
                "{category} shares an entry between lists"
            );
        }
    }

    #[test]
    fn very_unhealthy_mentions_n95() {
        let bundle = advise(Some(210.0));
        assert_eq!(bundle.category.category, AqiCategory::VeryUnhealthy);
        assert!(bundle.recommendations.iter().any(|r| r.contains("N95")));
    }

    #[test]
    fn legacy_table_shifts_category() {
        let table = BreakpointTable::new(BreakpointSet::LegacyMap);
        let bundle = advise_with(&table, Some(210.0));
        assert_eq!(bundle.category.category, AqiCategory::Unhealthy);
        assert_eq!(bundle.recommendations, UNHEALTHY);
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(advise(Some(10.0))).unwrap();
        assert!(value.get("reductionTips").is_some());
        assert_eq!(value["category"]["category"], "GOOD");
    }
}
