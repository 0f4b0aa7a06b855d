//! OpenWeatherMap response shapes, shared by the direct and proxied providers.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{CurrentWeather, LocationQuery, Observation, ProviderError};

/// Query parameters selecting a place for the current-weather endpoint.
pub(super) fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
    match query {
        LocationQuery::Zip(zip) => vec![("zip", zip.clone())],
        LocationQuery::Text(text) => vec![("q", text.clone())],
        LocationQuery::Coordinates { lat, lon } => coord_params(*lat, *lon),
    }
}

pub(super) fn coord_params(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
    vec![("lat", lat.to_string()), ("lon", lon.to_string())]
}

/// GET `url` and decode a JSON body, mapping error statuses.
pub(super) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    params: &[(&'static str, String)],
    what: &'static str,
) -> Result<T, ProviderError> {
    debug!(url, what, "requesting");

    let res = http.get(url).query(params).send().await?;

    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        debug!(%status, what, "provider returned error status");
        return Err(ProviderError::from_status(status, &body));
    }

    serde_json::from_str(&body).map_err(|source| ProviderError::Decode { what, source })
}

#[derive(Debug, Deserialize)]
pub(super) struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwWeather {
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct OwSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn unix_to_utc(ts: i64, what: &'static str) -> Result<DateTime<Utc>, ProviderError> {
    DateTime::from_timestamp(ts, 0).ok_or_else(|| ProviderError::InvalidResponse {
        what,
        reason: format!("timestamp {ts} is out of range"),
    })
}

impl OwCurrentResponse {
    pub(super) fn into_current(self, provider: &str) -> Result<CurrentWeather, ProviderError> {
        let observation_time = unix_to_utc(self.dt, "current weather")?;
        let weather = self.weather.into_iter().next();

        Ok(CurrentWeather {
            provider: provider.to_string(),
            location_name: self.name,
            country: self.sys.country,
            lat: self.coord.lat,
            lon: self.coord.lon,
            temperature: self.main.temp,
            feels_like: self.main.feels_like.unwrap_or(self.main.temp),
            humidity_pct: self.main.humidity.unwrap_or(0),
            condition_code: weather.as_ref().and_then(|w| w.icon.clone()),
            condition_text: weather.and_then(|w| w.description),
            observation_time,
        })
    }
}

impl OwForecastResponse {
    pub(super) fn into_observations(self) -> Result<Vec<Observation>, ProviderError> {
        self.list
            .into_iter()
            .map(|entry| {
                let timestamp = unix_to_utc(entry.dt, "forecast")?;
                let weather = entry.weather.into_iter().next();

                Ok(Observation {
                    timestamp,
                    temperature: entry.main.temp,
                    condition_code: weather.as_ref().and_then(|w| w.icon.clone()),
                    condition_text: weather.and_then(|w| w.description),
                })
            })
            .collect()
    }
}
