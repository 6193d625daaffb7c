use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use weather_core::WeatherError;

/// Field name -> human readable messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Everything a handler can fail with, rendered as the error envelope
/// `{"success": false, "message": ..., "errors": {...}}`.
#[derive(Debug)]
pub enum ApiError {
    Validation(FieldErrors),
    NotFound,
    Upstream { status: StatusCode, message: String },
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::NotFound => ApiError::NotFound,
            WeatherError::Upstream { .. } | WeatherError::Timeout => {
                let status = StatusCode::from_u16(err.status_code())
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                ApiError::Upstream { status, message: err.to_string() }
            }
            WeatherError::Config(_) | WeatherError::Unexpected(_) => {
                ApiError::Internal(format!("An error occurred while fetching weather data: {err}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match self {
            ApiError::Validation(errors) => ("Validation failed".to_string(), Some(errors)),
            ApiError::NotFound => ("City not found".to_string(), None),
            ApiError::Upstream { message, .. } | ApiError::Internal(message) => (message, None),
        };

        let body = ErrorBody { success: false, message, errors };
        (status, Json(body)).into_response()
    }
}
