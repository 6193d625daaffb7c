//! Forward and reverse geocoding against the OpenWeather geocoding API.
//!
//! Forward lookups fail loudly: an upstream error or an empty result is an
//! error for the caller. Reverse lookups never fail; when the place cannot be
//! named the caller still gets [`Location::unknown`].

use reqwest::Client;
use serde::Deserialize;

use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, Location},
    provider::{get_json, require_api_key},
};

#[derive(Debug, Clone, Deserialize)]
struct OwGeoPlace {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
}

impl From<OwGeoPlace> for Location {
    fn from(place: OwGeoPlace) -> Self {
        Location {
            name: place.name,
            country_code: place.country,
            coordinates: Coordinates {
                latitude: place.lat,
                longitude: place.lon,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    api_key: String,
    base_url: String,
    http: Client,
}

impl Geocoder {
    pub fn new(http: Client, api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn from_config(config: &Config, http: Client) -> anyhow::Result<Self> {
        let api_key = require_api_key(config)?;
        Ok(Self::new(http, api_key, config.provider.geo_base_url.clone()))
    }

    /// Resolve a city name to its best match.
    pub async fn resolve_by_name(&self, city: &str) -> Result<Location, WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);

        let places: Vec<OwGeoPlace> = get_json(
            &self.http,
            &url,
            &[
                ("q", city.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ],
            "OpenWeather geocoding",
        )
        .await?;

        let place = places.into_iter().next().ok_or(WeatherError::NotFound)?;
        tracing::debug!(city, resolved = %place.name, "geocoded city");
        Ok(place.into())
    }

    /// Name the place at `coords`, degrading to "Unknown Location".
    ///
    /// The returned location always carries the coordinates that were asked
    /// for, not the provider's snapped ones.
    pub async fn resolve_by_coordinates(&self, coords: Coordinates) -> Location {
        let url = format!("{}/geo/1.0/reverse", self.base_url);

        let result: Result<Vec<OwGeoPlace>, WeatherError> = get_json(
            &self.http,
            &url,
            &[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("limit", "1".to_string()),
                ("appid", self.api_key.clone()),
            ],
            "OpenWeather reverse geocoding",
        )
        .await;

        match result {
            Ok(places) => match places.into_iter().next() {
                Some(place) => Location {
                    name: place.name,
                    country_code: place.country,
                    coordinates: coords,
                },
                None => {
                    tracing::debug!(lat = coords.latitude, lon = coords.longitude, "no place name");
                    Location::unknown(coords)
                }
            },
            Err(e) => {
                tracing::warn!(
                    lat = coords.latitude,
                    lon = coords.longitude,
                    error = %e,
                    "reverse geocoding failed, using placeholder"
                );
                Location::unknown(coords)
            }
        }
    }
}
