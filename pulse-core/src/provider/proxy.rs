use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::{CurrentWeather, GeocodeCandidate, LocationQuery, Observation, ProviderError, Units};

use super::{
    WeatherProvider,
    wire::{self, OwCurrentResponse, OwForecastResponse},
};

/// Relay that holds the OpenWeatherMap key server-side.
pub const DEFAULT_WORKER_URL: &str = "https://pulse-weather.nable.workers.dev/";

/// OpenWeatherMap data through a key-less relay.
///
/// The relay multiplexes upstream APIs on an `endpoint` query parameter
/// (`weather`, `forecast`, `geocoding`) and forwards the rest untouched.
#[derive(Debug, Clone)]
pub struct ProxyProvider {
    worker_url: String,
    units: Units,
    http: Client,
}

impl ProxyProvider {
    pub fn new(worker_url: String, units: Units, http: Client) -> Self {
        Self {
            worker_url,
            units,
            http,
        }
    }

    fn params(
        &self,
        endpoint: &'static str,
        rest: Vec<(&'static str, String)>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![("endpoint", endpoint.to_string())];
        params.extend(rest);
        params.push(("units", self.units.as_str().to_string()));
        params
    }
}

#[async_trait]
impl WeatherProvider for ProxyProvider {
    #[instrument(skip(self), fields(provider = "proxy"))]
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, ProviderError> {
        let params = self.params("weather", wire::location_params(query));

        let parsed: OwCurrentResponse =
            wire::get_json(&self.http, &self.worker_url, &params, "current weather").await?;

        parsed.into_current("proxy")
    }

    #[instrument(skip(self), fields(provider = "proxy"))]
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<Observation>, ProviderError> {
        let params = self.params("forecast", wire::coord_params(lat, lon));

        let parsed: OwForecastResponse =
            wire::get_json(&self.http, &self.worker_url, &params, "forecast").await?;

        parsed.into_observations()
    }

    #[instrument(skip(self), fields(provider = "proxy"))]
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ProviderError> {
        let mut rest = wire::coord_params(lat, lon);
        rest.push(("limit", limit.to_string()));
        let params = self.params("geocoding", rest);

        wire::get_json(&self.http, &self.worker_url, &params, "geocoding").await
    }
}
