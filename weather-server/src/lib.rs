//! HTTP surface of the weather proxy.
//!
//! Routes:
//! - `GET /weather/city?city=<name>`
//! - `GET /weather/coordinates?lat=<f64>&lon=<f64>`
//! - `GET /weather/health`
//!
//! Successful lookups return the normalized document as-is; failures use the
//! `{success: false, message, errors?}` envelope from [`error::ApiError`].

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use weather_core::WeatherService;

pub mod error;
pub mod handlers;
pub mod validate;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

pub fn router(service: Arc<WeatherService>) -> Router {
    Router::new()
        .route("/weather/city", get(handlers::weather_by_city))
        .route("/weather/coordinates", get(handlers::weather_by_coordinates))
        .route("/weather/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}
