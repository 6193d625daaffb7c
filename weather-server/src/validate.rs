//! Query-parameter validation producing per-field messages.

use std::ops::RangeInclusive;

use weather_core::Coordinates;
use weather_core::model::{LATITUDE_RANGE, LONGITUDE_RANGE};

use crate::error::{ApiError, FieldErrors};

pub const MAX_CITY_CHARS: usize = 100;

/// Decoded query string, in request order. Keys may repeat.
pub type QueryPairs = [(String, String)];

enum Param<'a> {
    Missing,
    One(&'a str),
    Repeated,
}

fn param<'a>(query: &'a QueryPairs, field: &str) -> Param<'a> {
    let mut values = query.iter().filter(|(k, _)| k == field).map(|(_, v)| v.as_str());
    match (values.next(), values.next()) {
        (None, _) => Param::Missing,
        (Some(v), None) => Param::One(v),
        (Some(_), Some(_)) => Param::Repeated,
    }
}

/// A non-blank city name of at most [`MAX_CITY_CHARS`] characters.
pub fn city(query: &QueryPairs) -> Result<String, ApiError> {
    let mut errors = FieldErrors::new();

    let raw = match param(query, "city") {
        Param::Repeated => {
            push(&mut errors, "city", "The city field must be a single value.");
            return Err(ApiError::Validation(errors));
        }
        Param::Missing => None,
        Param::One(v) => Some(v),
    };

    match raw.map(str::trim) {
        None | Some("") => push(&mut errors, "city", "The city field is required."),
        Some(c) if c.chars().count() > MAX_CITY_CHARS => push(
            &mut errors,
            "city",
            &format!("The city field must not be greater than {MAX_CITY_CHARS} characters."),
        ),
        Some(c) => return Ok(c.to_string()),
    }

    Err(ApiError::Validation(errors))
}

/// Both `lat` and `lon`, each numeric and within range. All problems are
/// reported together.
pub fn coordinates(query: &QueryPairs) -> Result<Coordinates, ApiError> {
    let mut errors = FieldErrors::new();

    let latitude = number(&mut errors, "lat", param(query, "lat"), LATITUDE_RANGE);
    let longitude = number(&mut errors, "lon", param(query, "lon"), LONGITUDE_RANGE);

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
        _ => Err(ApiError::Validation(errors)),
    }
}

fn number(
    errors: &mut FieldErrors,
    field: &str,
    raw: Param<'_>,
    range: RangeInclusive<f64>,
) -> Option<f64> {
    let raw = match raw {
        Param::Repeated => {
            push(errors, field, &format!("The {field} field must be a single value."));
            return None;
        }
        Param::One(r) if !r.trim().is_empty() => r.trim(),
        _ => {
            push(errors, field, &format!("The {field} field is required."));
            return None;
        }
    };

    let value = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            push(errors, field, &format!("The {field} field must be a number."));
            return None;
        }
    };

    if !range.contains(&value) {
        let (min, max) = range.into_inner();
        push(errors, field, &format!("The {field} field must be between {min} and {max}."));
        return None;
    }

    Some(value)
}

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.entry(field.to_string()).or_default().push(message.to_string());
}
