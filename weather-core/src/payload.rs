//! Raw OpenWeather documents, as deserialized from the wire.
//!
//! Only the fields the normalizer reads are declared; everything else in the
//! provider's JSON is ignored.

use serde::Deserialize;

/// What a [`WeatherProvider`](crate::WeatherProvider) hands to the normalizer.
#[derive(Debug, Clone)]
pub enum RawWeatherPayload {
    /// One-call endpoint: current conditions and a daily array in one document.
    OneCall(OwOneCallResponse),
    /// Separate current-weather and 5-day/3-hour forecast documents.
    Split {
        current: OwCurrentResponse,
        forecast: OwForecastResponse,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWeather {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwPrecipitation {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWind {
    pub speed: f64,
}

// --- one-call ---

#[derive(Debug, Clone, Deserialize)]
pub struct OwOneCallResponse {
    /// Seconds east of UTC for the requested point.
    #[serde(default)]
    pub timezone_offset: i32,
    pub current: OwOneCallCurrent,
    #[serde(default)]
    pub daily: Vec<OwOneCallDaily>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwOneCallCurrent {
    pub dt: i64,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub uvi: Option<f64>,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub rain: Option<OwPrecipitation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwDailyTemp {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwOneCallDaily {
    pub dt: i64,
    pub temp: OwDailyTemp,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub pop: Option<f64>,
}

// --- split current + forecast ---

#[derive(Debug, Clone, Deserialize)]
pub struct OwCurrentResponse {
    pub dt: i64,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
    pub rain: Option<OwPrecipitation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastEntry {
    pub dt: i64,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastResponse {
    #[serde(default)]
    pub list: Vec<OwForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_call_with_optional_fields_missing() {
        let json = r#"{
            "lat": 40.71, "lon": -74.0, "timezone": "America/New_York",
            "current": {
                "dt": 1700000000, "temp": 12.3, "feels_like": 10.1,
                "humidity": 70, "wind_speed": 4.2,
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
            },
            "daily": [
                {"dt": 1700000000, "temp": {"min": 8.0, "max": 14.0, "day": 12.0}, "weather": []}
            ]
        }"#;

        let parsed: OwOneCallResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.current.uvi.is_none());
        assert!(parsed.current.rain.is_none());
        assert_eq!(parsed.current.weather[0].icon, "10d");
        assert_eq!(parsed.daily.len(), 1);
        assert!(parsed.daily[0].pop.is_none());
        assert_eq!(parsed.timezone_offset, 0);
    }

    #[test]
    fn current_rain_last_hour() {
        let json = r#"{
            "dt": 1700000000,
            "main": {"temp": 5.0, "feels_like": 2.0, "humidity": 90},
            "weather": [{"description": "moderate rain", "icon": "10n"}],
            "wind": {"speed": 6.1, "deg": 200},
            "rain": {"1h": 1.7}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rain.and_then(|r| r.one_hour), Some(1.7));
    }

    #[test]
    fn forecast_without_list_is_empty() {
        let parsed: OwForecastResponse = serde_json::from_str(r#"{"cod": "200"}"#).unwrap();
        assert!(parsed.list.is_empty());
    }
}
