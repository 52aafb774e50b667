//! Weather data models

use serde::{Deserialize, Serialize};

/// A single point-in-time weather reading
///
/// Field names on the wire follow the web client (`temperature`, `windSpeed`,
/// ...), units are fixed: Celsius, percent, m/s, hPa and km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(rename = "temperature")]
    pub temperature_c: f64,
    #[serde(rename = "humidity")]
    pub humidity_pct: f64,
    pub description: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed_mps: f64,
    #[serde(rename = "pressure")]
    pub pressure_hpa: f64,
    #[serde(rename = "visibility")]
    pub visibility_km: f64,
}

impl WeatherSnapshot {
    /// Reading served when the weather provider cannot be reached
    pub fn placeholder() -> Self {
        Self {
            temperature_c: 28.0,
            humidity_pct: 65.0,
            description: "partly cloudy".to_string(),
            wind_speed_mps: 3.2,
            pressure_hpa: 1013.0,
            visibility_km: 10.0,
        }
    }
}

/// Where a weather reading should be taken
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLocation {
    City(String),
    /// `label` keeps the coordinates as the caller wrote them
    Coordinates {
        latitude: f64,
        longitude: f64,
        label: String,
    },
}

impl WeatherLocation {
    /// Name shown to the user when the provider does not resolve one
    pub fn fallback_name(&self) -> String {
        match self {
            WeatherLocation::City(name) => name.clone(),
            WeatherLocation::Coordinates { label, .. } => label.clone(),
        }
    }
}

/// Recommendation category, one per rule family
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RecommendationCategory {
    Temperature,
    Humidity,
    Wind,
    General,
}

/// Urgency of a farming recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A localized piece of farming advice derived from a weather snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmingRecommendation {
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub icon: String,
}
