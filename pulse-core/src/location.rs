//! Picking a human-friendly place name out of geocoder results.

use crate::model::{CurrentWeather, GeocodeCandidate};

/// Name fragments that mark administrative areas rather than towns.
/// Matching is case-sensitive.
const ADMINISTRATIVE_MARKERS: [&str; 4] = ["County", "Parish", "ZIP", "Postal"];

/// Whether a candidate looks like a city rather than a county, postal area,
/// state or country.
pub fn is_city_like(candidate: &GeocodeCandidate) -> bool {
    let name = candidate.name.as_str();

    !name.is_empty()
        && !ADMINISTRATIVE_MARKERS.iter().any(|marker| name.contains(marker))
        && candidate.state.as_deref() != Some(name)
        && candidate.country.as_deref() != Some(name)
}

/// First city-like candidate, falling back to the geocoder's top result.
///
/// Returns `None` only when there are no candidates at all.
pub fn resolve_location_name(candidates: &[GeocodeCandidate]) -> Option<&GeocodeCandidate> {
    candidates
        .iter()
        .find(|candidate| is_city_like(candidate))
        .or_else(|| candidates.first())
}

/// Heading for the weather card, e.g. `"Miami, Florida"`.
///
/// The resolved name wins over the weather response's own place name only
/// when it is city-like. The region is the resolved state, else the weather
/// response's country code.
pub fn display_title(current: &CurrentWeather, resolved: Option<&GeocodeCandidate>) -> String {
    let city = resolved
        .filter(|candidate| is_city_like(candidate))
        .map(|candidate| candidate.name.as_str())
        .unwrap_or(current.location_name.as_str());

    let region = resolved
        .and_then(|candidate| candidate.state.as_deref())
        .filter(|state| !state.is_empty())
        .or_else(|| current.country.as_deref().filter(|c| !c.is_empty()));

    match region {
        Some(region) => format!("{city}, {region}"),
        None => city.to_string(),
    }
}
