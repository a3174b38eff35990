#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Combined air-quality report.
//!
//! Takes an [`AirQualitySnapshot`] in the API's JSON shape and runs every
//! component over it: classification, advisory, mitigation, forecast
//! windowing and summary, the sustained-AQI alert, and map point
//! synthesis. The components are independent; this crate only wires their
//! inputs and merges their outputs.

pub mod config;
pub mod snapshot;

use aqi_map_advisory::{AdvisoryBundle, MitigationSet, advise_with, compose_actions, suggest};
use aqi_map_category_models::AqiCategory;
use aqi_map_forecast_models::{ForecastPoint, ForecastSummary, SustainedAlert, window_trailing};
use aqi_map_pollutant_models::{PollutantInfo, SubIndices};
use aqi_map_spatial::{CityMatch, Coordinate, GeoPoint, RandomSource, nearest_city, synthesize};
use serde::Serialize;

pub use config::{DisplaySettings, ReportConfig, Theme, Units, load_config, parse_config_toml};
pub use snapshot::AirQualitySnapshot;

/// Errors from loading snapshots and configuration.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration parsed but is inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirQualityReport {
    pub aqi: Option<f64>,
    pub category: AqiCategory,
    pub advisory: AdvisoryBundle,
    pub dominant_pollutant: Option<PollutantInfo>,
    pub sub_indices: SubIndices,
    pub mitigation: MitigationSet,
    /// Local mitigation actions followed by the server's suggestions.
    pub actions: Vec<String>,
    pub forecast: Vec<ForecastPoint>,
    pub forecast_summary: ForecastSummary,
    pub peak_category: Option<AqiCategory>,
    pub alert: Option<SustainedAlert>,
    pub center: Coordinate,
    pub center_city: Option<CityMatch>,
    pub map_points: Vec<GeoPoint>,
    pub display: DisplaySettings,
}

/// Builds the full report for `snapshot`.
///
/// Never fails: missing inputs fall back to Unknown categories, empty
/// suggestion lists, and empty point sets.
#[must_use]
pub fn build_report<R: RandomSource + ?Sized>(
    snapshot: &AirQualitySnapshot,
    config: &ReportConfig,
    rng: &mut R,
) -> AirQualityReport {
    let table = config.breakpoint_table();
    let aqi = snapshot.effective_aqi();
    let advisory = advise_with(&table, aqi);

    let sub_indices = snapshot.sub_indices();
    let dominant = snapshot.dominant();
    let mitigation = suggest(dominant);
    let actions = compose_actions(&mitigation, &snapshot.suggestions);

    let forecast = window_trailing(&snapshot.forecast, config.forecast_window).to_vec();
    let forecast_summary = ForecastSummary::from_points(&forecast);
    let peak_category = forecast_summary.peak.map(|p| table.category_for(p));

    let alert = config.alert.evaluate(&snapshot.recent);

    let center = snapshot.center();
    let overrides = config.override_table();
    let map_points = synthesize(
        center,
        &forecast,
        (!overrides.is_empty()).then_some(&overrides),
        &config.synthesis,
        rng,
    );

    AirQualityReport {
        aqi,
        category: advisory.category.category,
        advisory,
        dominant_pollutant: dominant.map(aqi_map_pollutant_models::Pollutant::info),
        sub_indices,
        mitigation,
        actions,
        forecast,
        forecast_summary,
        peak_category,
        alert,
        center,
        center_city: nearest_city(center),
        map_points,
        display: config.display.clone(),
    }
}
