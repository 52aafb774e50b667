//! Heuristic soil moisture estimator
//!
//! Stands in for a field sensor: humidity dominates, recent rainfall
//! contributes moderately and temperature pulls the estimate down above a
//! 35°C reference (and up below it).

use crate::models::SoilInputs;

pub const HUMIDITY_WEIGHT: f64 = 0.6;
pub const RAINFALL_WEIGHT: f64 = 0.3;
pub const TEMPERATURE_WEIGHT: f64 = 0.1;
pub const REFERENCE_TEMPERATURE_C: f64 = 35.0;

/// Estimate soil moisture as a whole percentage in `0..=100`
///
/// Any real input is accepted; only the output is clamped.
pub fn estimate_moisture(temperature_c: f64, humidity_pct: f64, rainfall_mm: f64) -> u8 {
    let raw = humidity_pct * HUMIDITY_WEIGHT
        + rainfall_mm * RAINFALL_WEIGHT
        + (REFERENCE_TEMPERATURE_C - temperature_c) * TEMPERATURE_WEIGHT;

    if raw.is_nan() {
        return 0;
    }

    raw.clamp(0.0, 100.0).round() as u8
}

/// Estimate moisture from a farmer's field inputs
pub fn estimate_for(inputs: &SoilInputs) -> u8 {
    estimate_moisture(inputs.temperature_c, inputs.humidity_pct, inputs.rainfall_mm)
}
