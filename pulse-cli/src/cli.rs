use std::{
    fmt::{self, Write as _},
    sync::Arc,
};

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use pulse_core::{
    Config, LocationQuery, ProviderId, Units, WeatherReport, WeatherService,
    provider::{self, proxy::DEFAULT_WORKER_URL},
};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about = "Pulse weather: current conditions and a 5-day outlook")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, "openweather" or "proxy".
        provider: String,
    },

    /// Make a configured provider the default.
    Default {
        /// Provider short name, "openweather" or "proxy".
        provider: String,
    },

    /// Show current weather and the forecast for a place.
    Show {
        /// City name ("Miami, FL") or US ZIP code.
        #[arg(required_unless_present = "lat", conflicts_with_all = ["lat", "lon"])]
        query: Option<String>,

        /// Latitude, used together with --lon instead of a search query.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude, used together with --lat.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Use this provider instead of the configured default.
        #[arg(long)]
        provider: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Default { provider } => set_default(&provider),
            Command::Show {
                query,
                lat,
                lon,
                provider,
                json,
            } => {
                let query = location_query(query.as_deref(), lat, lon)?;
                show(&query, provider.as_deref(), json).await
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    match id {
        ProviderId::OpenWeather => {
            let api_key = inquire::Password::new("OpenWeatherMap API key:")
                .without_confirmation()
                .prompt()
                .context("Failed to read API key")?;

            if api_key.trim().is_empty() {
                bail!("API key must not be empty.");
            }
            config.upsert_provider_api_key(id, api_key.trim().to_string());
        }
        ProviderId::Proxy => {
            let url = inquire::Text::new("Relay URL:")
                .with_default(DEFAULT_WORKER_URL)
                .prompt()
                .context("Failed to read relay URL")?;

            config.upsert_provider_base_url(id, url.trim().to_string());
        }
    }

    let path = config.save()?;
    println!("Saved {id} settings to {}", path.display());
    Ok(())
}

fn set_default(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if !config.is_provider_configured(id) {
        bail!("Provider '{id}' is not configured.\nHint: run `pulse configure {id}` first.");
    }

    config.set_default_provider(id);
    config.save()?;
    println!("Default provider set to {id}");
    Ok(())
}

async fn show(query: &LocationQuery, provider_name: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;

    let weather_provider = match provider_name {
        Some(name) => provider::provider_from_config(ProviderId::try_from(name)?, &config)?,
        None => provider::default_provider_from_config(&config)?,
    };
    debug!(%query, "looking up weather");

    let service = WeatherService::new(Arc::from(weather_provider));
    let today = Utc::now().date_naive();
    let report = service.report(query, today).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report, config.units)?);
    }

    Ok(())
}

fn location_query(
    query: Option<&str>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> anyhow::Result<LocationQuery> {
    match (query, lat, lon) {
        (_, Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                bail!("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180");
            }
            Ok(LocationQuery::Coordinates { lat, lon })
        }
        (Some(text), _, _) => Ok(LocationQuery::parse(text)?),
        _ => bail!("Give a city, a ZIP code, or both --lat and --lon."),
    }
}

/// Human-readable report, as printed by `pulse show`.
pub(crate) fn render_report(report: &WeatherReport, units: Units) -> Result<String, fmt::Error> {
    let unit = units.symbol();
    let current = &report.current;
    let mut out = String::new();

    writeln!(out, "{}", report.title)?;
    writeln!(
        out,
        "  {:.0}{unit}  {}",
        current.temperature,
        current.condition_text.as_deref().unwrap_or("Unknown")
    )?;
    writeln!(
        out,
        "  Feels like {:.0}{unit} • Humidity {}%",
        current.feels_like, current.humidity_pct
    )?;

    if report.forecast.is_empty() {
        writeln!(out, "\nForecast unavailable.")?;
        return Ok(out);
    }

    writeln!(out, "\n{}-day forecast", report.forecast.len())?;
    for day in &report.forecast {
        writeln!(
            out,
            "  {}  High {:>4.0}{unit}  Low {:>4.0}{unit}  {}",
            day.date.format("%a %b %d"),
            day.high,
            day.low,
            day.dominant_condition_text.as_deref().unwrap_or("")
        )?;
    }

    Ok(out)
}
