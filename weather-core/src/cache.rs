//! Short-lived, process-wide cache of normalized weather.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::model::{Coordinates, NormalizedWeather};

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Key for a city lookup: case-insensitive on the city name.
pub fn city_key(city: &str) -> String {
    format!("weather_city_{}", city.trim().to_lowercase())
}

const COORDINATE_SCALE: f64 = 1e4;

/// Round both components to the 4 decimal places a coordinate key carries.
///
/// Lookups run on the snapped point, so every request sharing a key also
/// shares the coordinates reported in the cached document.
pub fn snap_coordinates(coords: Coordinates) -> Coordinates {
    let snap = |v: f64| (v * COORDINATE_SCALE).round() / COORDINATE_SCALE;
    Coordinates {
        latitude: snap(coords.latitude),
        longitude: snap(coords.longitude),
    }
}

/// Key for a coordinate lookup.
///
/// Both components are fixed to 4 decimal places so that `40.7128` and
/// `40.71280` share an entry.
pub fn coordinates_key(coords: Coordinates) -> String {
    let coords = snap_coordinates(coords);
    format!("weather_coords_{:.4}_{:.4}", coords.latitude, coords.longitude)
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: NormalizedWeather,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct WeatherCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the stored value unless it is missing or expired.
    pub async fn get(&self, key: &str) -> Option<NormalizedWeather> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(e) if !e.is_expired(Instant::now()) => {
                tracing::debug!(key, "weather cache hit");
                Some(e.data.clone())
            }
            Some(_) => {
                tracing::debug!(key, "weather cache entry expired");
                None
            }
            None => {
                tracing::debug!(key, "weather cache miss");
                None
            }
        }
    }

    /// Store `data` under `key` for the cache's TTL, replacing any previous entry.
    pub async fn put(&self, key: String, data: NormalizedWeather) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, e| !e.is_expired(now));
        tracing::debug!(key = %key, ttl_secs = self.ttl.as_secs(), "weather data cached");
        entries.insert(
            key,
            CacheEntry {
                data,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of stored entries, expired ones included until the next `put`.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
        tracing::debug!("weather cache cleared");
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
