use crate::{
    Config, CurrentWeather, GeocodeCandidate, LocationQuery, Observation, ProviderError,
    provider::{openweather::OpenWeatherProvider, proxy::ProxyProvider},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

pub mod openweather;
pub mod proxy;
mod wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    Proxy,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::Proxy => "proxy",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::Proxy]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "proxy" => Ok(ProviderId::Proxy),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, proxy."
            )),
        }
    }
}

/// Source of current conditions, 3-hour forecasts and reverse geocoding.
///
/// Both implementations speak the OpenWeatherMap wire format.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, ProviderError>;

    /// Raw forecast readings, in the order the provider lists them.
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<Observation>, ProviderError>;

    /// Place matches for a coordinate, in the provider's relevance order.
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ProviderError>;
}

pub(crate) fn http_client(timeout_secs: u64) -> Result<Client, ProviderError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    Ok(client)
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let http = http_client(config.timeout_secs)?;
    let settings = config.provider_config(id);
    let base_url = settings.and_then(|cfg| cfg.base_url.clone());

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::OpenWeather => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                     Hint: run `pulse configure {id}` and enter your API key."
                )
            })?;

            let mut provider = OpenWeatherProvider::new(api_key.to_owned(), config.units, http);
            if let Some(url) = base_url {
                provider = provider.with_base_url(url);
            }
            Box::new(provider)
        }
        ProviderId::Proxy => {
            let worker_url = base_url.unwrap_or_else(|| proxy::DEFAULT_WORKER_URL.to_string());
            Box::new(ProxyProvider::new(worker_url, config.units, http))
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config)
}
