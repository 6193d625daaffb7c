//! Core library for the weather proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Geocoding and weather clients for OpenWeather (one-call and split layouts)
//! - Normalization of provider documents into a stable client schema
//! - A short-TTL in-process cache and the [`WeatherService`] tying it together
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod provider;
pub mod service;

pub use cache::WeatherCache;
pub use config::{CacheConfig, Config, ProviderConfig, ServerConfig};
pub use error::WeatherError;
pub use geocode::Geocoder;
pub use model::{
    Coordinates, CurrentConditions, DailyForecast, Location, NormalizedWeather, WeatherIcon,
};
pub use payload::RawWeatherPayload;
pub use provider::{ProviderKind, WeatherProvider};
pub use service::WeatherService;
