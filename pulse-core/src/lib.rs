//! Core library for the Pulse weather page.
//!
//! This crate defines:
//! - Daily forecast summaries built from raw 3-hour readings
//! - Place-name selection from reverse geocoding results
//! - Search query classification
//! - Abstraction over OpenWeatherMap-style providers (direct or proxied)
//! - Configuration & credentials handling
//!
//! The summarizing and resolving functions are pure; everything that talks
//! to the network sits behind [`WeatherProvider`].

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod query;
pub mod service;
pub mod summary;

pub use config::{Config, ProviderConfig};
pub use error::ProviderError;
pub use location::{display_title, is_city_like, resolve_location_name};
pub use model::{
    CurrentWeather, DaySummary, GeocodeCandidate, Observation, Units, WeatherReport, icon_url,
};
pub use provider::{ProviderId, WeatherProvider};
pub use query::{LocationQuery, QueryError};
pub use service::WeatherService;
pub use summary::{MAX_FORECAST_DAYS, summarize_forecast};
