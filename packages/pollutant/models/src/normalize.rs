//! Pollutant label normalization.
//!
//! Maps the label spellings seen across feeds (`OpenAQ` parameter names,
//! Open-Meteo hourly variable names, CSV headers, the API's own labels) to
//! the canonical [`Pollutant`] set. Matching is case-insensitive and
//! ignores spaces, underscores, hyphens, and dots.

use crate::Pollutant;

/// Error returned by `Pollutant::from_str` for a label outside the
/// canonical set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPollutantError {
    /// The label that could not be mapped.
    pub label: String,
}

impl std::fmt::Display for UnknownPollutantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized pollutant label {:?}", self.label)
    }
}

impl std::error::Error for UnknownPollutantError {}

/// Maps a raw pollutant label to the canonical [`Pollutant`].
///
/// Returns `None` when no mapping exists. Callers treat that as "no
/// advice available", not as an error.
#[must_use]
pub fn normalize_label(raw: &str) -> Option<Pollutant> {
    let key: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | '.'))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    match key.as_str() {
        "PM25" => Some(Pollutant::Pm25),
        "PM10" => Some(Pollutant::Pm10),
        "NO2" | "NITROGENDIOXIDE" => Some(Pollutant::No2),
        "SO2" | "SULPHURDIOXIDE" | "SULFURDIOXIDE" => Some(Pollutant::So2),
        "OZONE" | "O3" => Some(Pollutant::Ozone),
        "CO" | "CARBONMONOXIDE" => Some(Pollutant::Co),
        "NH3" | "AMMONIA" => Some(Pollutant::Nh3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_api_spellings() {
        for raw in ["PM2.5", "PM 2.5", "PM_2.5", "pm25", "pm2_5", "PM25"] {
            assert_eq!(normalize_label(raw), Some(Pollutant::Pm25), "{raw}");
        }
        for raw in ["PM10", "PM 10", "PM_10", "pm10"] {
            assert_eq!(normalize_label(raw), Some(Pollutant::Pm10), "{raw}");
        }
    }

    #[test]
    fn maps_gas_names() {
        assert_eq!(normalize_label("o3"), Some(Pollutant::Ozone));
        assert_eq!(normalize_label("OZONE"), Some(Pollutant::Ozone));
        assert_eq!(normalize_label("nitrogen_dioxide"), Some(Pollutant::No2));
        assert_eq!(normalize_label("sulphur_dioxide"), Some(Pollutant::So2));
        assert_eq!(normalize_label("carbon_monoxide"), Some(Pollutant::Co));
        assert_eq!(normalize_label(" nh3 "), Some(Pollutant::Nh3));
    }

    #[test]
    fn unknown_labels_map_to_none() {
        assert_eq!(normalize_label(""), None);
        assert_eq!(normalize_label("benzene"), None);
        assert_eq!(normalize_label("PM1"), None);
    }

    #[test]
    fn from_str_reports_label() {
        let err = "dust".parse::<Pollutant>().unwrap_err();
        assert_eq!(err.label, "dust");
        assert_eq!("so2".parse::<Pollutant>().unwrap(), Pollutant::So2);
    }
}
