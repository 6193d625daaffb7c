use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Serialize;
use weather_core::NormalizedWeather;

use crate::{AppState, error::ApiError, validate};

/// Raw query pairs. Fields are picked out by [`validate`] so that missing,
/// repeated or non-numeric values become field errors rather than extractor
/// rejections.
type RawQuery = Query<Vec<(String, String)>>;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// `GET /weather/city?city=<name>`
pub async fn weather_by_city(
    State(state): State<AppState>,
    Query(query): RawQuery,
) -> Result<Json<NormalizedWeather>, ApiError> {
    let city = validate::city(&query).inspect_err(|_| {
        tracing::info!(query = ?query, "rejected city request");
    })?;

    match state.service.by_city(&city).await {
        Ok(weather) => Ok(Json(weather)),
        Err(e) => {
            tracing::error!(city = %city, status = e.status_code(), error = %e, "weather lookup by city failed");
            Err(e.into())
        }
    }
}

/// `GET /weather/coordinates?lat=<f64>&lon=<f64>`
pub async fn weather_by_coordinates(
    State(state): State<AppState>,
    Query(query): RawQuery,
) -> Result<Json<NormalizedWeather>, ApiError> {
    let coords = validate::coordinates(&query).inspect_err(|_| {
        tracing::info!(query = ?query, "rejected coordinates request");
    })?;

    match state.service.by_coordinates(coords).await {
        Ok(weather) => Ok(Json(weather)),
        Err(e) => {
            tracing::error!(
                lat = coords.latitude,
                lon = coords.longitude,
                status = e.status_code(),
                error = %e,
                "weather lookup by coordinates failed"
            );
            Err(e.into())
        }
    }
}

/// `GET /weather/health`
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        message: "Weather API is running",
        timestamp: Utc::now().to_rfc3339(),
    })
}
