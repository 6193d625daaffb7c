//! The cache → geocode → fetch → normalize → cache pipeline.

use crate::{
    Config,
    cache::{WeatherCache, city_key, coordinates_key, snap_coordinates},
    error::WeatherError,
    geocode::Geocoder,
    model::{Coordinates, NormalizedWeather},
    normalize::normalize,
    provider::{WeatherProvider, http_client, provider_from_config},
};

/// Orchestrates one weather lookup per call.
///
/// Concurrent misses for the same key are not coalesced: each performs its
/// own upstream calls and the last `put` wins.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Geocoder,
    provider: Box<dyn WeatherProvider>,
    cache: WeatherCache,
}

impl WeatherService {
    pub fn new(geocoder: Geocoder, provider: Box<dyn WeatherProvider>, cache: WeatherCache) -> Self {
        Self { geocoder, provider, cache }
    }

    /// Wire up every collaborator from a loaded [`Config`].
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = http_client(config)?;
        let geocoder = Geocoder::from_config(config, http.clone())?;
        let provider = provider_from_config(config, http)?;
        let cache = WeatherCache::new(config.cache_ttl());

        tracing::info!(
            provider = %provider.kind(),
            cache_ttl_secs = cache.ttl().as_secs(),
            "weather service configured"
        );

        Ok(Self::new(geocoder, provider, cache))
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Weather for a city name. Unknown cities yield [`WeatherError::NotFound`].
    pub async fn by_city(&self, city: &str) -> Result<NormalizedWeather, WeatherError> {
        let key = city_key(city);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let location = self.geocoder.resolve_by_name(city.trim()).await?;
        let payload = self.provider.fetch(location.coordinates).await?;
        let weather = normalize(&payload, location);

        self.cache.put(key, weather.clone()).await;
        Ok(weather)
    }

    /// Weather for a point. Never fails because the place has no name.
    ///
    /// The point is snapped to cache-key precision first; the returned
    /// location carries the snapped coordinates.
    pub async fn by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<NormalizedWeather, WeatherError> {
        let coords = snap_coordinates(coords);
        let key = coordinates_key(coords);
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let location = self.geocoder.resolve_by_coordinates(coords).await;
        let payload = self.provider.fetch(coords).await?;
        let weather = normalize(&payload, location);

        self.cache.put(key, weather.clone()).await;
        Ok(weather)
    }
}
