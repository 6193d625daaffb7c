use thiserror::Error;

/// Failures produced by the weather pipeline.
///
/// The HTTP layer maps each variant onto a status code; see
/// [`WeatherError::status_code`].
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Forward geocoding returned no match.
    #[error("City not found")]
    NotFound,

    /// The provider answered with a non-success status, or could not be reached.
    #[error("Upstream request failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// An outbound call did not complete within the configured timeout.
    #[error("Upstream request timed out")]
    Timeout,

    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else, e.g. a provider payload that does not parse.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl WeatherError {
    /// HTTP status that best describes this error to a client.
    pub fn status_code(&self) -> u16 {
        match self {
            WeatherError::NotFound => 404,
            WeatherError::Upstream { status, .. } => *status,
            WeatherError::Timeout => 504,
            WeatherError::Config(_) | WeatherError::Unexpected(_) => 500,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error, what: &str) -> Self {
        if err.is_timeout() {
            tracing::warn!("{what} request timed out");
            return WeatherError::Timeout;
        }

        match err.status() {
            Some(status) => WeatherError::Upstream {
                status: status.as_u16(),
                message: format!("{what} request failed: {err}"),
            },
            None => WeatherError::Upstream {
                status: 502,
                message: format!("{what} request failed: {err}"),
            },
        }
    }
}
