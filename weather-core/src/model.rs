use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` when either component is outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude) {
            Some(Self { latitude, longitude })
        } else {
            None
        }
    }
}

/// A resolved place, attached to every weather response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    pub country_code: String,
    pub coordinates: Coordinates,
}

impl Location {
    pub const UNKNOWN_NAME: &'static str = "Unknown Location";

    /// Placeholder used when reverse geocoding cannot name the coordinates.
    pub fn unknown(coordinates: Coordinates) -> Self {
        Self {
            name: Self::UNKNOWN_NAME.to_string(),
            country_code: String::new(),
            coordinates,
        }
    }
}

/// Coarse condition category exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    #[default]
    Sun,
    Cloud,
    Rain,
    Storm,
    Snow,
    Mist,
}

impl WeatherIcon {
    /// Map an OpenWeather icon code such as `"10d"` to a category.
    ///
    /// Only the first two characters matter. Unknown codes fall back to
    /// [`WeatherIcon::Sun`].
    pub fn from_provider_code(code: &str) -> Self {
        match code.get(..2) {
            Some("01") => Self::Sun,
            Some("02" | "03" | "04") => Self::Cloud,
            Some("09" | "10") => Self::Rain,
            Some("11") => Self::Storm,
            Some("13") => Self::Snow,
            Some("50") => Self::Mist,
            _ => Self::Sun,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Cloud => "cloud",
            Self::Rain => "rain",
            Self::Storm => "storm",
            Self::Snow => "snow",
            Self::Mist => "mist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp_c: i32,
    pub temp_f: i32,
    pub condition: String,
    pub icon: WeatherIcon,
    pub wind_speed: i32,
    pub humidity: u8,
    pub precipitation: f64,
    pub feels_like_c: i32,
    pub uv_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// `YYYY-MM-DD`
    pub date: String,
    /// e.g. `"Mon 14"`
    pub day_label: String,
    pub temp_min_c: i32,
    pub temp_max_c: i32,
    pub temp_min_f: i32,
    pub temp_max_f: i32,
    pub icon: WeatherIcon,
    pub condition: String,
    pub precipitation_chance: u8,
}

/// The client-facing document; also the value held in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWeather {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub last_updated: DateTime<Utc>,
}
