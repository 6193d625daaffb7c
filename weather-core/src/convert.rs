//! Unit conversion and the rounding rules applied to every reported value.
//!
//! Rounding is half away from zero (`f64::round`): `0.5 -> 1`, `-0.5 -> -1`.

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn round_to_int(value: f64) -> i32 {
    value.round() as i32
}

/// Rounded Fahrenheit computed from the raw Celsius reading.
///
/// This is not the same as converting the already-rounded Celsius value:
/// `0.4 C` reports `0 C` but `33 F`.
pub fn fahrenheit_from_raw(celsius: f64) -> i32 {
    round_to_int(celsius_to_fahrenheit(celsius))
}

/// Probability-of-precipitation fraction (0..=1) as a whole percentage.
pub fn chance_percent(pop: Option<f64>) -> u8 {
    pop.map(|p| (p * 100.0).round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}
