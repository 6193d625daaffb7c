use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::WeatherError,
    model::Coordinates,
    payload::{OwCurrentResponse, OwForecastResponse, RawWeatherPayload},
};

use super::{ProviderKind, WeatherProvider, get_json};

/// OpenWeather 2.5 current weather plus the 5-day/3-hour forecast.
///
/// Both requests must succeed; the first failure aborts the fetch.
#[derive(Debug, Clone)]
pub struct SplitProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl SplitProvider {
    pub fn new(http: Client, api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn query(&self, coords: Coordinates) -> [(&'static str, String); 4] {
        [
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("units", "metric".to_string()),
            ("appid", self.api_key.clone()),
        ]
    }
}

#[async_trait]
impl WeatherProvider for SplitProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Split
    }

    async fn fetch(&self, coords: Coordinates) -> Result<RawWeatherPayload, WeatherError> {
        let query = self.query(coords);

        tracing::debug!(lat = coords.latitude, lon = coords.longitude, "fetching current weather");
        let current: OwCurrentResponse = get_json(
            &self.http,
            &format!("{}/data/2.5/weather", self.base_url),
            &query,
            "OpenWeather current weather",
        )
        .await?;

        tracing::debug!(lat = coords.latitude, lon = coords.longitude, "fetching 5-day forecast");
        let forecast: OwForecastResponse = get_json(
            &self.http,
            &format!("{}/data/2.5/forecast", self.base_url),
            &query,
            "OpenWeather forecast",
        )
        .await?;

        Ok(RawWeatherPayload::Split { current, forecast })
    }
}
