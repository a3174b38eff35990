//! Timestamp parsing for forecast payloads.
//!
//! The API emits RFC 3339 timestamps for live readings but naive
//! `YYYY-MM-DD HH:MM` strings for historical rows. Naive values are taken
//! as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a forecast timestamp. Returns `None` if no known format matches.
#[must_use]
pub fn parse_forecast_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Serde adapter for [`parse_forecast_datetime`].
///
/// # Errors
///
/// Fails if the field is not a string or matches none of the accepted
/// formats.
pub fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_forecast_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized datetime {raw:?}")))
}
