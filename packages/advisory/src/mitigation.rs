//! Pollutant-specific mitigation suggestions.

use aqi_map_pollutant_models::{Pollutant, PollutantFamily, normalize_label};
use serde::Serialize;

const PARTICULATE: &[&str] = &[
    "Deploy air-purifying plants (Areca Palm, Money Plant, Snake Plant)",
    "Introduce water sprinkling on roads in affected zones",
    "Control construction dust; cover debris and stockpiles",
    "Advise N95 masks for sensitive groups",
];

const COMBUSTION: &[&str] = &[
    "Promote carpooling and public transport in next 12 hours",
    "Restrict heavy-duty truck entry during peak hours",
    "Optimize traffic flow and reduce idling near hotspots",
    "Encourage remote work where possible",
];

const PHOTOCHEMICAL: &[&str] = &[
    "Reduce outdoor exercise during afternoon; stay indoors",
    "Avoid solvent/paint usage today; ventilate indoor spaces",
    "Shift outdoor tasks to morning/evening",
    "Advise schools to limit strenuous outdoor activities",
];

/// Ordered actions for a dominant pollutant.
///
/// Pollutants in the same family share one set, so `PM2.5` and `PM10`
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MitigationSet {
    pub family: Option<PollutantFamily>,
    pub actions: &'static [&'static str],
}

impl MitigationSet {
    pub const EMPTY: Self = Self {
        family: None,
        actions: &[],
    };

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.actions.len()
    }
}

/// Suggests actions for the dominant pollutant.
///
/// Pollutants without dedicated advice, and a missing pollutant, give
/// [`MitigationSet::EMPTY`].
#[must_use]
pub const fn suggest(dominant: Option<Pollutant>) -> MitigationSet {
    let Some(pollutant) = dominant else {
        return MitigationSet::EMPTY;
    };

    let family = pollutant.family();
    let actions: &'static [&'static str] = match family {
        PollutantFamily::Particulate => PARTICULATE,
        PollutantFamily::Combustion => COMBUSTION,
        PollutantFamily::Photochemical => PHOTOCHEMICAL,
        PollutantFamily::Other => return MitigationSet::EMPTY,
    };

    MitigationSet {
        family: Some(family),
        actions,
    }
}

/// Like [`suggest`], but takes the raw label as it appears in a payload.
#[must_use]
pub fn suggest_label(label: Option<&str>) -> MitigationSet {
    let pollutant = label.and_then(|raw| {
        let parsed = normalize_label(raw);
        if parsed.is_none() {
            log::debug!("no mitigation mapping for pollutant label {raw:?}");
        }
        parsed
    });
    suggest(pollutant)
}

/// Joins local suggestions with server-supplied ones, local first.
///
/// Duplicates are kept.
#[must_use]
pub fn compose_actions<S: AsRef<str>>(local: &MitigationSet, server: &[S]) -> Vec<String> {
    local
        .actions
        .iter()
        .map(|s| (*s).to_string())
        .chain(server.iter().map(|s| s.as_ref().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particulates_share_a_set() {
        assert_eq!(suggest(Some(Pollutant::Pm25)), suggest(Some(Pollutant::Pm10)));
        assert_eq!(suggest_label(Some("PM2.5")), suggest_label(Some("PM10")));
        assert_eq!(suggest(Some(Pollutant::Pm25)).len(), 4);
    }

    #[test]
    fn combustion_gases_share_traffic_actions() {
        let set = suggest_label(Some("NO2"));
        assert_eq!(set, suggest_label(Some("SO2")));
        assert!(set.actions.iter().any(|a| a.contains("carpooling")));
        assert!(set.actions.iter().any(|a| a.contains("public transport")));
    }

    #[test]
    fn ozone_gets_photochemical_actions() {
        let set = suggest_label(Some("o3"));
        assert_eq!(set.family, Some(PollutantFamily::Photochemical));
        assert!(set.actions[0].contains("afternoon"));
    }

    #[test]
    fn missing_or_unmapped_labels_are_empty() {
        assert!(suggest(None).is_empty());
        assert!(suggest_label(None).is_empty());
        assert!(suggest_label(Some("benzene")).is_empty());
        assert!(suggest_label(Some("")).is_empty());
        assert!(suggest(Some(Pollutant::Co)).is_empty());
        assert!(suggest(Some(Pollutant::Nh3)).is_empty());
    }

    #[test]
    fn composition_puts_local_first_and_keeps_duplicates() {
        let local = suggest(Some(Pollutant::Ozone));
        let server = vec![
            "Check local advisories".to_string(),
            PHOTOCHEMICAL[0].to_string(),
        ];
        let actions = compose_actions(&local, &server);
        assert_eq!(actions.len(), 6);
        assert_eq!(actions[0], PHOTOCHEMICAL[0]);
        assert_eq!(actions[4], "Check local advisories");
        assert_eq!(actions[5], PHOTOCHEMICAL[0]);
    }

    #[test]
    fn composition_with_nothing_local() {
        let actions = compose_actions(&MitigationSet::EMPTY, &["a", "b"]);
        assert_eq!(actions, vec!["a", "b"]);
    }
}
