use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::WeatherError,
    model::Coordinates,
    payload::{OwOneCallResponse, RawWeatherPayload},
};

use super::{ProviderKind, WeatherProvider, get_json};

/// OpenWeather One Call 3.0: current conditions and daily forecast in one request.
#[derive(Debug, Clone)]
pub struct OneCallProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OneCallProvider {
    pub fn new(http: Client, api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[async_trait]
impl WeatherProvider for OneCallProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OneCall
    }

    async fn fetch(&self, coords: Coordinates) -> Result<RawWeatherPayload, WeatherError> {
        let url = format!("{}/data/3.0/onecall", self.base_url);

        tracing::debug!(lat = coords.latitude, lon = coords.longitude, "fetching one-call weather");

        let doc: OwOneCallResponse = get_json(
            &self.http,
            &url,
            &[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("exclude", "minutely,hourly,alerts".to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ],
            "OpenWeather one-call",
        )
        .await?;

        Ok(RawWeatherPayload::OneCall(doc))
    }
}
