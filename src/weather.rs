//! Current-weather lookup against an OpenWeatherMap-style endpoint.
//!
//! Every failure collapses to the same operator-facing sentence, but the
//! reason is kept in [`WeatherFailure`] so it can be logged and tested.

use crate::config::WeatherSettings;
use crate::error::{ConciergeError, Result};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, instrument, warn};

/// Message returned for any failed lookup.
pub const OFFLINE_MESSAGE: &str = "Weather service is currently offline.";

/// Why a lookup did not produce a report.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherFailure {
    /// No API key was configured.
    MissingApiKey,
    /// The request never completed (DNS, connect, TLS, timeout, body read).
    Transport(String),
    /// The body was not JSON or lacked the expected fields.
    Malformed(String),
}

impl fmt::Display for WeatherFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherFailure::MissingApiKey => write!(f, "no weather API key configured"),
            WeatherFailure::Transport(e) => write!(f, "request failed: {}", e),
            WeatherFailure::Malformed(e) => write!(f, "unexpected response: {}", e),
        }
    }
}

/// Result of a weather lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Report {
        location: String,
        /// Temperature as the provider wrote it, so `21.5` stays `21.5`.
        temperature: serde_json::Number,
        description: String,
    },
    Unavailable(WeatherFailure),
}

impl fmt::Display for WeatherOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherOutcome::Report {
                location,
                temperature,
                description,
            } => write!(f, "Weather in {}: {}°C, {}.", location, temperature, description),
            WeatherOutcome::Unavailable(_) => f.write_str(OFFLINE_MESSAGE),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainBlock,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

/// Build an outcome from a raw response body.
pub fn parse_report(location: &str, body: &str) -> WeatherOutcome {
    let parsed: CurrentWeather = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return WeatherOutcome::Unavailable(WeatherFailure::Malformed(e.to_string())),
    };

    match parsed.weather.into_iter().next() {
        Some(condition) => WeatherOutcome::Report {
            location: location.to_string(),
            temperature: parsed.main.temp,
            description: condition.description,
        },
        None => WeatherOutcome::Unavailable(WeatherFailure::Malformed(
            "empty weather condition list".to_string(),
        )),
    }
}

/// HTTP client for the weather endpoint.
pub struct WeatherClient {
    http: reqwest::Client,
    endpoint: String,
    units: String,
    api_key: Option<String>,
}

impl WeatherClient {
    /// Create a client from settings and the startup API key.
    pub fn new(settings: &WeatherSettings, api_key: Option<String>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConciergeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            units: settings.units.clone(),
            api_key,
        })
    }

    /// Look up current conditions for a free-text location. Never fails;
    /// problems come back as [`WeatherOutcome::Unavailable`].
    #[instrument(skip(self))]
    pub async fn lookup(&self, location: &str) -> WeatherOutcome {
        let outcome = match &self.api_key {
            None => WeatherOutcome::Unavailable(WeatherFailure::MissingApiKey),
            Some(key) => match self.fetch(location, key).await {
                Ok(body) => parse_report(location, &body),
                Err(e) => WeatherOutcome::Unavailable(WeatherFailure::Transport(e.to_string())),
            },
        };

        if let WeatherOutcome::Unavailable(reason) = &outcome {
            warn!("Weather lookup for {:?} failed: {}", location, reason);
        }
        outcome
    }

    async fn fetch(&self, location: &str, api_key: &str) -> reqwest::Result<String> {
        debug!("GET {} q={}", self.endpoint, location);
        self.http
            .get(&self.endpoint)
            .query(&[("q", location), ("appid", api_key), ("units", self.units.as_str())])
            .send()
            .await?
            .text()
            .await
    }
}
