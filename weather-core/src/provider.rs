use crate::{
    Config,
    error::WeatherError,
    model::Coordinates,
    payload::RawWeatherPayload,
    provider::{onecall::OneCallProvider, split::SplitProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{convert::TryFrom, fmt::Debug};

pub mod onecall;
pub mod split;

/// Which OpenWeather endpoint layout the proxy talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// One request returning current conditions plus an 8-day daily array.
    OneCall,
    /// Two requests: current weather and the 5-day/3-hour forecast.
    Split,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OneCall => "onecall",
            ProviderKind::Split => "split",
        }
    }

    pub const fn all() -> &'static [ProviderKind] {
        &[ProviderKind::OneCall, ProviderKind::Split]
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "onecall" | "one-call" => Ok(ProviderKind::OneCall),
            "split" => Ok(ProviderKind::Split),
            _ => Err(anyhow::anyhow!(
                "Unknown provider kind '{value}'. Supported kinds: onecall, split."
            )),
        }
    }
}

/// Fetches raw weather documents for a point.
///
/// Any non-success status from a required call fails the whole fetch;
/// partial payloads are never returned.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn kind(&self) -> ProviderKind;

    async fn fetch(&self, coords: Coordinates) -> Result<RawWeatherPayload, WeatherError>;
}

/// Build the shared outbound HTTP client with the configured timeout.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("weather-proxy/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Construct the configured provider.
pub fn provider_from_config(
    config: &Config,
    http: Client,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let kind = config
        .provider_kind()
        .map_err(|e| WeatherError::Config(e.to_string()))?;
    let api_key = require_api_key(config)?;
    let base_url = config.provider.data_base_url.clone();

    let boxed: Box<dyn WeatherProvider> = match kind {
        ProviderKind::OneCall => Box::new(OneCallProvider::new(http, api_key, base_url)),
        ProviderKind::Split => Box::new(SplitProvider::new(http, api_key, base_url)),
    };

    Ok(boxed)
}

pub(crate) fn require_api_key(config: &Config) -> Result<String, WeatherError> {
    config.api_key().map(str::to_owned).ok_or_else(|| {
        WeatherError::Config(format!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather-server configure` or set {}.",
            crate::config::API_KEY_ENV
        ))
    })
}

/// GET `url` and decode a JSON body, mapping failures onto [`WeatherError`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
    what: &str,
) -> Result<T, WeatherError> {
    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| WeatherError::from_transport(e, what))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| WeatherError::from_transport(e, what))?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "{what} request failed");
        return Err(WeatherError::Upstream {
            status: status.as_u16(),
            message: format!(
                "{what} request failed with status {status}: {}",
                truncate_body(&body)
            ),
        });
    }

    let parsed = serde_json::from_str(&body)
        .with_context(|| format!("Failed to parse {what} JSON: {}", truncate_body(&body)))?;

    Ok(parsed)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
