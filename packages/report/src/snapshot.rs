//! The air-quality snapshot as the HTTP API returns it.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use aqi_map_forecast_models::ForecastPoint;
use aqi_map_pollutant_models::{Pollutant, SubIndices, normalize_label};
use aqi_map_spatial::{Coordinate, DEFAULT_CENTER, lookup_city};
use serde::Deserialize;

use crate::ReportError;

/// One reading for a location. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AirQualitySnapshot {
    pub aqi: Option<f64>,
    pub pollutant_subindices: BTreeMap<String, Option<f64>>,
    pub dominant_pollutant: Option<String>,
    pub forecast: Vec<ForecastPoint>,
    /// Recent observed hourly readings, oldest first.
    #[serde(alias = "history")]
    pub recent: Vec<ForecastPoint>,
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
    pub city: Option<String>,
    /// Suggestions computed server-side.
    pub suggestions: Vec<String>,
}

impl AirQualitySnapshot {
    /// Parses a snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if the JSON is malformed or a field has
    /// the wrong shape.
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a snapshot from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Json`] if reading or parsing fails.
    pub fn from_reader(reader: impl Read) -> Result<Self, ReportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the file cannot be read, or
    /// [`ReportError::Json`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Sub-indices with unrecognized labels and empty values dropped.
    #[must_use]
    pub fn sub_indices(&self) -> SubIndices {
        SubIndices::from_raw(self.pollutant_subindices.iter().map(|(k, v)| (k, *v)))
    }

    /// The reported AQI, or the largest sub-index when the API sent none.
    #[must_use]
    pub fn effective_aqi(&self) -> Option<f64> {
        self.aqi.or_else(|| self.sub_indices().overall_aqi())
    }

    /// The dominant pollutant: the API's label when it maps to a known
    /// pollutant, otherwise the pollutant with the highest sub-index.
    #[must_use]
    pub fn dominant(&self) -> Option<Pollutant> {
        self.dominant_pollutant
            .as_deref()
            .and_then(normalize_label)
            .or_else(|| self.sub_indices().dominant())
    }

    /// Map center: explicit coordinates, then a seed city by name, then
    /// the default center.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude)
            && lat.is_finite()
            && lon.is_finite()
        {
            return Coordinate::new(lat, lon);
        }
        self.city
            .as_deref()
            .and_then(lookup_city)
            .map_or(DEFAULT_CENTER, |c| c.location)
    }
}
