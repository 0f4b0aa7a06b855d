use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    CurrentWeather, LocationQuery, ProviderError, WeatherProvider, WeatherReport,
    location::{display_title, resolve_location_name},
    summary::summarize_forecast,
};

/// How many reverse-geocoding matches to ask for.
pub const GEOCODE_LIMIT: u8 = 5;

/// Builds a full weather page report from one provider.
#[derive(Debug)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Current conditions, resolved place and the forecast strip for `query`.
    ///
    /// Only the current-weather lookup is fatal. Geocoding or forecast
    /// failures are logged and leave those parts of the report empty.
    /// `today` is left out of the forecast.
    pub async fn report(
        &self,
        query: &LocationQuery,
        today: NaiveDate,
    ) -> Result<WeatherReport, ProviderError> {
        let current = self.current_with_retry(query).await?;
        let (lat, lon) = (current.lat, current.lon);

        let candidates = match self.provider.reverse_geocode(lat, lon, GEOCODE_LIMIT).await {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "could not fetch detailed location info");
                Vec::new()
            }
        };

        let location = resolve_location_name(&candidates).cloned();
        let title = display_title(&current, location.as_ref());
        info!(%title, candidates = candidates.len(), "resolved location");

        let forecast = match self.provider.forecast(lat, lon).await {
            Ok(observations) => summarize_forecast(&observations, today),
            Err(err) => {
                warn!(error = %err, "forecast unavailable");
                Vec::new()
            }
        };

        Ok(WeatherReport {
            title,
            current,
            location,
            forecast,
        })
    }

    async fn current_with_retry(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentWeather, ProviderError> {
        match self.provider.current(query).await {
            Err(err) if err.is_not_found() => match query.with_country_fallback() {
                Some(retry) => {
                    info!(%query, %retry, "location not found, retrying with country");
                    self.provider.current(&retry).await.map_err(|retry_err| {
                        warn!(%retry, error = %retry_err, "retry with country failed");
                        ProviderError::NotFound
                    })
                }
                None => Err(err),
            },
            other => other,
        }
    }
}
