//! Soil and weather advisory engine
//!
//! Pure, stateless functions. Nothing here performs I/O or reads the clock,
//! so every call with the same inputs yields the same output.

pub mod irrigation;
pub mod moisture;
pub mod weather_rules;

pub use irrigation::{
    advise_irrigation, compose_prediction, fallback_advisory, IrrigationAdvice,
    IRRIGATION_THRESHOLD_PCT,
};
pub use moisture::{estimate_for, estimate_moisture};
pub use weather_rules::{
    build_recommendations, summarize_recommendations, WeatherCondition, RULE_TABLE,
};
