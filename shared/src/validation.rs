//! Input coercion and validation for advisory requests
//!
//! Numeric form fields arrive as numbers, numeric strings or garbage. The
//! advisory engine never rejects a reading, so everything unparseable is
//! coerced to `0` before it reaches the estimator.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::models::WeatherLocation;

/// Input problems that are reported back to the caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Location or coordinates required")]
    MissingLocation,

    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

impl InputError {
    /// Request field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            InputError::MissingLocation => "location",
            InputError::LatitudeOutOfRange => "lat",
            InputError::LongitudeOutOfRange => "lon",
        }
    }
}

// ============================================================================
// Numeric Coercion
// ============================================================================

/// Parse the leading decimal number of a string, ignoring trailing text
///
/// `"30.5°C"` gives `30.5`, `"abc"` gives `None`. Results that overflow to
/// infinity are rejected.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce an arbitrary JSON value to a number, `0` when it is not one
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_leading_float(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Serde adapter applying [`coerce_number`] to a field
pub fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

/// Serde adapter for free-text fields: strings pass through, anything else is `""`
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Serde adapter for optional free-text fields, non-strings read as absent
pub fn deserialize_lenient_optional_string<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

// ============================================================================
// Location Validation
// ============================================================================

/// Validate latitude/longitude ranges
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), InputError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(InputError::LatitudeOutOfRange);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(InputError::LongitudeOutOfRange);
    }
    Ok(())
}

/// Resolve the weather location from raw query parameters
///
/// A non-blank city name wins over coordinates. Coordinates are only used
/// when both `lat` and `lon` are present and parse as numbers.
pub fn resolve_weather_location(
    location: Option<&str>,
    lat: Option<&str>,
    lon: Option<&str>,
) -> Result<WeatherLocation, InputError> {
    if let Some(name) = location.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(WeatherLocation::City(name.to_string()));
    }

    let lat = lat.map(str::trim).filter(|s| !s.is_empty());
    let lon = lon.map(str::trim).filter(|s| !s.is_empty());

    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let latitude = parse_leading_float(lat).ok_or(InputError::LatitudeOutOfRange)?;
            let longitude = parse_leading_float(lon).ok_or(InputError::LongitudeOutOfRange)?;
            validate_coordinates(latitude, longitude)?;
            Ok(WeatherLocation::Coordinates {
                latitude,
                longitude,
                label: format!("{}, {}", lat, lon),
            })
        }
        _ => Err(InputError::MissingLocation),
    }
}
