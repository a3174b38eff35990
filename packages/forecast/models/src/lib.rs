#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Forecast series types.
//!
//! A forecast series is a time-ordered list of [`ForecastPoint`]s. The
//! functions here never reorder a series; the producer is trusted to emit
//! points in chronological order.

pub mod parsing;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use parsing::parse_forecast_datetime;

/// Number of trailing forecast points used by the map and charts.
pub const DEFAULT_FORECAST_WINDOW: usize = 12;

/// A single forecast (or observed) AQI reading at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(deserialize_with = "parsing::deserialize_datetime")]
    pub datetime: DateTime<Utc>,
    pub aqi: f64,
}

impl ForecastPoint {
    #[must_use]
    pub const fn new(datetime: DateTime<Utc>, aqi: f64) -> Self {
        Self { datetime, aqi }
    }
}

/// Returns the last `n` entries of `series`, in their original order.
///
/// A series no longer than `n` is returned whole. `n == 0` yields an empty
/// slice.
#[must_use]
pub fn window_trailing<T>(series: &[T], n: usize) -> &[T] {
    &series[series.len().saturating_sub(n)..]
}

/// Aggregate figures over a forecast window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub count: usize,
    pub average: Option<f64>,
    pub peak: Option<f64>,
    pub peak_at: Option<DateTime<Utc>>,
    pub low: Option<f64>,
}

impl ForecastSummary {
    /// Summarizes `points`, ignoring non-finite readings.
    #[must_use]
    pub fn from_points(points: &[ForecastPoint]) -> Self {
        let mut count = 0_usize;
        let mut sum = 0.0;
        let mut peak: Option<&ForecastPoint> = None;
        let mut low: Option<f64> = None;

        for point in points.iter().filter(|p| p.aqi.is_finite()) {
            count += 1;
            sum += point.aqi;
            if peak.is_none_or(|p| point.aqi > p.aqi) {
                peak = Some(point);
            }
            low = Some(low.map_or(point.aqi, |l: f64| l.min(point.aqi)));
        }

        #[allow(clippy::cast_precision_loss)]
        let average = (count > 0).then(|| sum / count as f64);

        Self {
            count,
            average,
            peak: peak.map(|p| p.aqi),
            peak_at: peak.map(|p| p.datetime),
            low,
        }
    }
}

/// Rule for the "sustained high AQI" alert.
///
/// Fires when the last `consecutive` readings all strictly exceed
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertRule {
    pub threshold: f64,
    pub consecutive: usize,
}

impl Default for AlertRule {
    fn default() -> Self {
        Self {
            threshold: 200.0,
            consecutive: 3,
        }
    }
}

/// A fired sustained-AQI alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainedAlert {
    pub message: String,
    pub since: DateTime<Utc>,
    pub peak: f64,
}

impl AlertRule {
    /// Evaluates the rule against the tail of `readings`.
    ///
    /// Returns `None` when there are fewer than `consecutive` readings, when
    /// `consecutive` is zero, or when any reading in the tail is at or below
    /// the threshold.
    #[must_use]
    pub fn evaluate(&self, readings: &[ForecastPoint]) -> Option<SustainedAlert> {
        if self.consecutive == 0 || readings.len() < self.consecutive {
            return None;
        }

        let tail = window_trailing(readings, self.consecutive);
        if !tail.iter().all(|p| p.aqi > self.threshold) {
            return None;
        }

        let peak = tail.iter().map(|p| p.aqi).fold(f64::MIN, f64::max);
        let message = format!(
            "AQI > {} for >{} hours: Take mitigation actions",
            self.threshold,
            self.consecutive - 1
        );
        log::info!("{message} (peak {peak})");

        Some(SustainedAlert {
            message,
            since: tail[0].datetime,
            peak,
        })
    }
}
