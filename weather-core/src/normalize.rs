//! Reshaping provider documents into [`NormalizedWeather`].

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};

use crate::{
    convert::{chance_percent, fahrenheit_from_raw, round_to_int},
    forecast::{select_daily, select_daily_array, utc_datetime},
    model::{CurrentConditions, DailyForecast, Location, NormalizedWeather, WeatherIcon},
    payload::{OwForecastEntry, OwOneCallDaily, OwPrecipitation, OwWeather, RawWeatherPayload},
};

/// Normalize a payload, stamping it with the current time.
pub fn normalize(payload: &RawWeatherPayload, location: Location) -> NormalizedWeather {
    normalize_at(payload, location, Utc::now())
}

/// Same as [`normalize`] with an explicit clock; `now` decides both
/// `lastUpdated` and which calendar day counts as today.
pub fn normalize_at(
    payload: &RawWeatherPayload,
    location: Location,
    now: DateTime<Utc>,
) -> NormalizedWeather {
    let (current, forecast) = match payload {
        RawWeatherPayload::OneCall(doc) => {
            let c = &doc.current;
            let (condition, icon) = describe(&c.weather);
            let current = CurrentConditions {
                temp_c: round_to_int(c.temp),
                temp_f: fahrenheit_from_raw(c.temp),
                condition,
                icon,
                wind_speed: round_to_int(c.wind_speed),
                humidity: c.humidity,
                precipitation: last_hour(c.rain.as_ref()),
                feels_like_c: round_to_int(c.feels_like),
                uv_index: c.uvi.unwrap_or(0.0),
            };
            let zone = FixedOffset::east_opt(doc.timezone_offset).unwrap_or(Utc.fix());
            let forecast = select_daily_array(&doc.daily)
                .iter()
                .filter_map(|day| daily_from_one_call(day, zone))
                .collect();
            (current, forecast)
        }
        RawWeatherPayload::Split { current: c, forecast: f } => {
            let (condition, icon) = describe(&c.weather);
            let current = CurrentConditions {
                temp_c: round_to_int(c.main.temp),
                temp_f: fahrenheit_from_raw(c.main.temp),
                condition,
                icon,
                wind_speed: round_to_int(c.wind.speed),
                humidity: c.main.humidity,
                precipitation: last_hour(c.rain.as_ref()),
                feels_like_c: round_to_int(c.main.feels_like),
                // The split endpoints carry no UV data.
                uv_index: 0.0,
            };
            let forecast = select_daily(&f.list, now.date_naive())
                .into_iter()
                .filter_map(daily_from_interval)
                .collect();
            (current, forecast)
        }
    };

    NormalizedWeather {
        location,
        current,
        forecast,
        last_updated: now,
    }
}

fn describe(weather: &[OwWeather]) -> (String, WeatherIcon) {
    match weather.first() {
        Some(w) => (w.description.clone(), WeatherIcon::from_provider_code(&w.icon)),
        None => ("Unknown".to_string(), WeatherIcon::default()),
    }
}

fn last_hour(rain: Option<&OwPrecipitation>) -> f64 {
    rain.and_then(|r| r.one_hour).unwrap_or(0.0)
}

/// Daily entries are dated in the point's own zone, so local noon stays on
/// its calendar day.
fn daily_from_one_call(day: &OwOneCallDaily, zone: FixedOffset) -> Option<DailyForecast> {
    let at = utc_datetime(day.dt)?.with_timezone(&zone).naive_local();
    let (condition, icon) = describe(&day.weather);
    Some(daily_forecast(at, day.temp.min, day.temp.max, icon, condition, day.pop))
}

fn daily_from_interval(entry: &OwForecastEntry) -> Option<DailyForecast> {
    let at = utc_datetime(entry.dt)?.naive_utc();
    let (condition, icon) = describe(&entry.weather);
    let min = entry.main.temp_min.unwrap_or(entry.main.temp);
    let max = entry.main.temp_max.unwrap_or(entry.main.temp);
    Some(daily_forecast(at, min, max, icon, condition, entry.pop))
}

fn daily_forecast(
    at: NaiveDateTime,
    min_c: f64,
    max_c: f64,
    icon: WeatherIcon,
    condition: String,
    pop: Option<f64>,
) -> DailyForecast {
    DailyForecast {
        date: at.format("%Y-%m-%d").to_string(),
        day_label: at.format("%a %-d").to_string(),
        temp_min_c: round_to_int(min_c),
        temp_max_c: round_to_int(max_c),
        temp_min_f: fahrenheit_from_raw(min_c),
        temp_max_f: fahrenheit_from_raw(max_c),
        icon,
        condition,
        precipitation_chance: chance_percent(pop),
    }
}
