//! Report configuration.
//!
//! Everything here has a default, so an empty file (or no file at all)
//! yields the standard behavior.

use std::path::Path;

use aqi_map_category_models::{AqiCategory, BreakpointSet, BreakpointTable};
use aqi_map_forecast_models::{AlertRule, DEFAULT_FORECAST_WINDOW};
use aqi_map_spatial::{OverrideEntry, OverrideTable, SynthesisConfig};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::ReportError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub breakpoints: BreakpointSet,
    pub forecast_window: usize,
    pub alert: AlertRule,
    pub synthesis: SynthesisConfig,
    /// Extra fixed point lists, applied after the demo fixture.
    pub overrides: Vec<OverrideEntry>,
    pub display: DisplaySettings,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointSet::default(),
            forecast_window: DEFAULT_FORECAST_WINDOW,
            alert: AlertRule::default(),
            synthesis: SynthesisConfig::default(),
            overrides: Vec::new(),
            display: DisplaySettings::default(),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn breakpoint_table(&self) -> BreakpointTable {
        BreakpointTable::new(self.breakpoints)
    }

    /// Builds the override table: the demo fixture when enabled, then the
    /// configured entries.
    #[must_use]
    pub fn override_table(&self) -> OverrideTable {
        let mut table = if self.synthesis.use_demo_overrides {
            OverrideTable::demo()
        } else {
            OverrideTable::empty()
        };
        table.extend_from_entries(&self.overrides);
        table
    }

    /// Checks that synthesized points land in the categories their kind
    /// stands for under the selected breakpoints: every hotspot AQI above
    /// the Moderate range, every safe-zone AQI within it or below.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidConfig`] naming the offending band.
    pub fn validate(&self) -> Result<(), ReportError> {
        let moderate_upper = self
            .breakpoint_table()
            .range_of(AqiCategory::Moderate)
            .map_or(100.0, |(_, upper)| upper);

        let hotspot = self.synthesis.hotspot.aqi;
        if !(hotspot.min > moderate_upper && hotspot.span >= 0.0) {
            return Err(ReportError::InvalidConfig {
                message: format!(
                    "synthesis.hotspot.aqi must start above {moderate_upper} (got min = {}, span = {})",
                    hotspot.min, hotspot.span
                ),
            });
        }

        let safezone = self.synthesis.safezone.aqi;
        if !(safezone.min >= 0.0 && safezone.span >= 0.0 && safezone.max() <= moderate_upper) {
            return Err(ReportError::InvalidConfig {
                message: format!(
                    "synthesis.safezone.aqi must lie within 0..={moderate_upper} (got min = {}, span = {})",
                    safezone.min, safezone.span
                ),
            });
        }

        Ok(())
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

/// Presentation preferences. Passed through to the report untouched; none
/// of the computations read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub theme: Theme,
    pub units: Units,
    pub language: String,
    pub refresh_interval_secs: u32,
    pub notifications: bool,
    pub auto_refresh: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            units: Units::Metric,
            language: "en".to_string(),
            refresh_interval_secs: 60,
            notifications: true,
            auto_refresh: true,
        }
    }
}

/// Parses a configuration from a TOML string.
///
/// # Errors
///
/// Returns [`ReportError::Toml`] if the TOML is malformed or a key has the
/// wrong type, or [`ReportError::InvalidConfig`] if it fails
/// [`ReportConfig::validate`].
pub fn parse_config_toml(toml_str: &str) -> Result<ReportConfig, ReportError> {
    let config: ReportConfig = toml::de::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be read, or the errors of
/// [`parse_config_toml`].
pub fn load_config(path: &Path) -> Result<ReportConfig, ReportError> {
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config_toml(&contents)?;
    log::info!(
        "Loaded config from {} ({} breakpoints, {} overrides)",
        path.display(),
        config.breakpoints,
        config.overrides.len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use aqi_map_spatial::Coordinate;

    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = parse_config_toml("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.forecast_window, 12);
        assert_eq!(config.breakpoints, BreakpointSet::Standard);
        assert!(config.override_table().is_empty());
    }

    #[test]
    fn parses_example_config() {
        let toml_str = include_str!("../config/aqi_map.example.toml");
        let config = parse_config_toml(toml_str).unwrap();
        assert_eq!(config.alert.consecutive, 3);
        assert!(config.synthesis.use_demo_overrides);
        assert_eq!(config.synthesis.safezone.max_points, 3);
        assert_eq!(config.display.theme, Theme::Dark);
        assert_eq!(config.display.language, "hi");
        assert!(!config.display.auto_refresh);

        let table = config.override_table();
        assert_eq!(table.len(), 2);
        let mumbai = table.lookup(Coordinate::new(19.0760, 72.8777)).unwrap();
        assert_eq!(mumbai.len(), 3);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config_toml(
            r#"
            breakpoints = "legacy_map"

            [alert]
            threshold = 150.0
            "#,
        )
        .unwrap();
        assert_eq!(config.breakpoints, BreakpointSet::LegacyMap);
        assert!((config.alert.threshold - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.alert.consecutive, 3);
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn partial_hotspot_table_keeps_defaults() {
        let config = parse_config_toml("[synthesis.hotspot]\nthreshold = 150.0\n").unwrap();
        assert!((config.synthesis.hotspot.threshold - 150.0).abs() < f64::EPSILON);
        assert_eq!(config.synthesis.hotspot.max_points, 4);
        assert_eq!(config.synthesis.safezone, SynthesisConfig::default().safezone);
    }

    #[test]
    fn rejects_hotspot_band_in_good_range() {
        let err = parse_config_toml(
            r#"
            [synthesis.hotspot]
            aqi = { min = 10.0, span = 20.0 }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::InvalidConfig { .. }), "{err}");
        assert!(err.to_string().contains("synthesis.hotspot.aqi"), "{err}");
    }

    #[test]
    fn rejects_safezone_band_reaching_past_moderate() {
        let err = parse_config_toml(
            r#"
            [synthesis.safezone]
            aqi = { min = 60.0, span = 60.0 }
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("synthesis.safezone.aqi"), "{err}");
    }

    #[test]
    fn default_bands_hold_under_both_tables() {
        for breakpoints in [BreakpointSet::Standard, BreakpointSet::LegacyMap] {
            let config = ReportConfig {
                breakpoints,
                ..ReportConfig::default()
            };
            assert!(config.validate().is_ok(), "{breakpoints}");
        }
    }

    #[test]
    fn rejects_unknown_breakpoint_set() {
        let err = parse_config_toml(r#"breakpoints = "metric""#).unwrap_err();
        assert!(matches!(err, ReportError::Toml(_)), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/aqi_map.toml")).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}
