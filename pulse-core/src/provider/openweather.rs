use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::{CurrentWeather, GeocodeCandidate, LocationQuery, Observation, ProviderError, Units};

use super::{
    WeatherProvider,
    wire::{self, OwCurrentResponse, OwForecastResponse},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Direct OpenWeatherMap access with a personal API key.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: Units, http: Client) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            units,
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn with_auth(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.as_str().to_string()));
        params
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(provider = "openweather"))]
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, ProviderError> {
        let params = self.with_auth(wire::location_params(query));

        let parsed: OwCurrentResponse = wire::get_json(
            &self.http,
            &self.url("/data/2.5/weather"),
            &params,
            "current weather",
        )
        .await?;

        parsed.into_current("openweather")
    }

    #[instrument(skip(self), fields(provider = "openweather"))]
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<Observation>, ProviderError> {
        let params = self.with_auth(wire::coord_params(lat, lon));

        let parsed: OwForecastResponse = wire::get_json(
            &self.http,
            &self.url("/data/2.5/forecast"),
            &params,
            "forecast",
        )
        .await?;

        parsed.into_observations()
    }

    #[instrument(skip(self), fields(provider = "openweather"))]
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        let mut params = wire::coord_params(lat, lon);
        params.push(("limit", limit.to_string()));
        params.push(("appid", self.api_key.clone()));

        wire::get_json(&self.http, &self.url("/geo/1.0/reverse"), &params, "geocoding").await
    }
}
