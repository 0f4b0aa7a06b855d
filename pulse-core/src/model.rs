use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single forecast or current reading at a point in time.
///
/// Temperatures are kept in whatever unit the provider returned them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_text: Option<String>,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, temperature: f64) -> Self {
        Self {
            timestamp,
            temperature,
            condition_code: None,
            condition_text: None,
        }
    }

    pub fn with_condition(mut self, code: impl Into<String>, text: impl Into<String>) -> Self {
        self.condition_code = Some(code.into());
        self.condition_text = Some(text.into());
        self
    }

    /// Calendar day of the reading, in UTC.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Aggregated statistics for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub representative_timestamp: DateTime<Utc>,
    pub high: f64,
    pub low: f64,
    pub dominant_condition_code: Option<String>,
    pub dominant_condition_text: Option<String>,
}

impl DaySummary {
    /// OpenWeatherMap icon URL for the dominant condition, if there is one.
    pub fn icon_url(&self) -> Option<String> {
        self.dominant_condition_code.as_deref().map(icon_url)
    }
}

/// A place match returned by a geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Empty when the geocoder sent no name (missing or `null`).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl GeocodeCandidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: None,
            country: None,
            lat: None,
            lon: None,
        }
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// Current conditions at a place, as reported by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub provider: String,
    pub location_name: String,
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub condition_code: Option<String>,
    pub condition_text: Option<String>,
    pub observation_time: DateTime<Utc>,
}

/// Everything the weather page shows for one lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub title: String,
    pub current: CurrentWeather,
    pub location: Option<GeocodeCandidate>,
    pub forecast: Vec<DaySummary>,
}

/// Temperature units requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Standard,
    Metric,
    #[default]
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Standard => "K",
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{code}@2x.png")
}
