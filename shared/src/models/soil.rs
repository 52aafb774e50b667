//! Soil moisture models

use serde::{Deserialize, Serialize};

use crate::validation::{
    deserialize_lenient_number, deserialize_lenient_optional_string, deserialize_lenient_string,
};

/// Field conditions supplied by the farmer
///
/// Numeric fields are coerced leniently: numbers pass through, numeric
/// strings are parsed by their leading number, anything else becomes `0`.
/// Text fields that are null or not strings read as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilInputs {
    #[serde(rename = "temperature", default, deserialize_with = "deserialize_lenient_number")]
    pub temperature_c: f64,
    #[serde(rename = "humidity", default, deserialize_with = "deserialize_lenient_number")]
    pub humidity_pct: f64,
    #[serde(rename = "rainfall", default, deserialize_with = "deserialize_lenient_number")]
    pub rainfall_mm: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub crop_type: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub season: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_optional_string"
    )]
    pub location: Option<String>,
}

/// Recommendation wording for a prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryText {
    pub recommendation: String,
    pub next_check: String,
}

/// Result of a best-effort call to an external collaborator
///
/// `External` carries what the collaborator produced, `Fallback` carries the
/// local default used because the call failed or its output was unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    External(T),
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn is_external(&self) -> bool {
        matches!(self, Outcome::External(_))
    }

    pub fn source(&self) -> AdvisorySource {
        match self {
            Outcome::External(_) => AdvisorySource::External,
            Outcome::Fallback(_) => AdvisorySource::Fallback,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Outcome::External(value) | Outcome::Fallback(value) => value,
        }
    }
}

/// Which branch produced a prediction's wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySource {
    External,
    #[default]
    Fallback,
}

/// Soil moisture prediction returned to the client
///
/// `moisture_pct` and `irrigation_needed` are always computed locally; only
/// the wording may come from an external generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoisturePrediction {
    #[serde(rename = "moistureLevel")]
    pub moisture_pct: u8,
    pub irrigation_needed: bool,
    pub recommendation: String,
    pub next_check: String,
    #[serde(skip)]
    pub source: AdvisorySource,
}
