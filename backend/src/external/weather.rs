//! Weather API client for fetching current conditions
//!
//! Integrates with the OpenWeatherMap current weather endpoint

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{WeatherLocation, WeatherSnapshot};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Source of current weather readings
#[axum::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current reading for a location
    async fn current_weather(&self, location: &WeatherLocation) -> AppResult<ObservedWeather>;
}

/// A reading together with the place name the provider resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedWeather {
    pub snapshot: WeatherSnapshot,
    pub location_name: String,
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    name: String,
    sys: Option<OWMSys>,
    main: OWMMain,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    wind: Option<OWMWind>,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a WeatherClient from configuration
    pub fn from_config(config: &WeatherConfig) -> AppResult<Self> {
        Self::new(
            config.api_key.clone(),
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Fetch current weather conditions by city name or coordinates
    pub async fn get_current_weather(
        &self,
        location: &WeatherLocation,
    ) -> AppResult<ObservedWeather> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let mut params: Vec<(&str, String)> = vec![
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        match location {
            WeatherLocation::City(name) => params.push(("q", name.clone())),
            WeatherLocation::Coordinates {
                latitude,
                longitude,
                ..
            } => {
                params.push(("lat", latitude.to_string()));
                params.push(("lon", longitude.to_string()));
            }
        }

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::WeatherService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response.json().await.map_err(|e| {
            AppError::WeatherService(format!("Failed to parse weather response: {}", e))
        })?;

        convert_current_response(data, location)
    }
}

#[axum::async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_weather(&self, location: &WeatherLocation) -> AppResult<ObservedWeather> {
        self.get_current_weather(location).await
    }
}

/// Convert OpenWeatherMap current response to our format
///
/// A reading without any weather condition is treated as a failed fetch.
fn convert_current_response(
    data: OWMCurrentResponse,
    requested: &WeatherLocation,
) -> AppResult<ObservedWeather> {
    let description = data
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| {
            AppError::WeatherService("Weather response has no conditions".to_string())
        })?;

    let country = data
        .sys
        .and_then(|s| s.country)
        .filter(|c| !c.is_empty());

    let location_name = match (data.name.is_empty(), country) {
        (true, _) => requested.fallback_name(),
        (false, Some(country)) => format!("{}, {}", data.name, country),
        (false, None) => data.name,
    };

    let snapshot = WeatherSnapshot {
        temperature_c: data.main.temp.round(),
        humidity_pct: data.main.humidity,
        description,
        wind_speed_mps: data.wind.map(|w| w.speed).unwrap_or(0.0),
        pressure_hpa: data.main.pressure,
        // Metres on the wire, kilometres for farmers
        visibility_km: data.visibility.unwrap_or(10_000.0) / 1000.0,
    };

    Ok(ObservedWeather {
        snapshot,
        location_name,
    })
}
