//! Shared fixtures for router and client tests
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot` with
//! in-memory collaborators standing in for PostgreSQL and the external APIs.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use agri_advisory_backend::{
    create_app,
    error::{AppError, AppResult},
    external::{AdvisoryGenerator, AdvisoryRequest, ObservedWeather, WeatherProvider},
    middleware::auth::Claims,
    services::history::{
        HistoryStore, NewSoilPrediction, NewWeatherRecommendation, SoilPredictionRecord,
    },
    AppState, Config,
};
use shared::{AdvisoryText, PageSize, WeatherLocation, WeatherSnapshot};

pub const TEST_SECRET: &str = "test-secret";

// ============================================================================
// Fake collaborators
// ============================================================================

/// In-memory history store
#[derive(Default)]
pub struct MemoryStore {
    pub soil: Mutex<Vec<SoilPredictionRecord>>,
    pub weather: Mutex<Vec<NewWeatherRecommendation>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn soil_rows(&self) -> Vec<SoilPredictionRecord> {
        self.soil.lock().unwrap().clone()
    }

    pub fn weather_rows(&self) -> Vec<NewWeatherRecommendation> {
        self.weather.lock().unwrap().clone()
    }
}

#[axum::async_trait]
impl HistoryStore for MemoryStore {
    async fn record_soil_prediction(
        &self,
        entry: NewSoilPrediction,
    ) -> AppResult<SoilPredictionRecord> {
        if self.fail_writes {
            return Err(AppError::Internal("store offline".to_string()));
        }
        let record = SoilPredictionRecord {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            temperature: entry.temperature,
            humidity: entry.humidity,
            rainfall: entry.rainfall,
            crop_type: entry.crop_type,
            season: entry.season,
            predicted_moisture: entry.predicted_moisture,
            recommendation: entry.recommendation,
            language: entry.language,
            created_at: Utc::now(),
        };
        self.soil.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn recent_soil_predictions(
        &self,
        user_id: Uuid,
        limit: PageSize,
    ) -> AppResult<Vec<SoilPredictionRecord>> {
        let rows = self.soil.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(limit.get() as usize)
            .cloned()
            .collect())
    }

    async fn record_weather_recommendation(
        &self,
        entry: NewWeatherRecommendation,
    ) -> AppResult<Uuid> {
        if self.fail_writes {
            return Err(AppError::Internal("store offline".to_string()));
        }
        self.weather.lock().unwrap().push(entry);
        Ok(Uuid::new_v4())
    }

    async fn ping(&self) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Internal("store offline".to_string()));
        }
        Ok(())
    }
}

/// Weather provider returning a fixed reading, or failing when empty
#[derive(Default)]
pub struct StaticWeather {
    pub reading: Option<ObservedWeather>,
    pub requests: Mutex<Vec<WeatherLocation>>,
}

impl StaticWeather {
    pub fn reading(snapshot: WeatherSnapshot, location_name: &str) -> Self {
        Self {
            reading: Some(ObservedWeather {
                snapshot,
                location_name: location_name.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[axum::async_trait]
impl WeatherProvider for StaticWeather {
    async fn current_weather(&self, location: &WeatherLocation) -> AppResult<ObservedWeather> {
        self.requests.lock().unwrap().push(location.clone());
        self.reading
            .clone()
            .ok_or_else(|| AppError::WeatherService("provider offline".to_string()))
    }
}

/// Advisory generator returning a fixed reply, or failing when empty
#[derive(Default)]
pub struct StaticAdvisor {
    pub reply: Option<AdvisoryText>,
    pub requests: Mutex<Vec<AdvisoryRequest>>,
}

impl StaticAdvisor {
    pub fn replying(recommendation: &str, next_check: &str) -> Self {
        Self {
            reply: Some(AdvisoryText {
                recommendation: recommendation.to_string(),
                next_check: next_check.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[axum::async_trait]
impl AdvisoryGenerator for StaticAdvisor {
    async fn soil_advisory(&self, request: &AdvisoryRequest) -> AppResult<AdvisoryText> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| AppError::AdvisoryService("generator offline".to_string()))
    }
}

// ============================================================================
// Test application
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub weather: Arc<StaticWeather>,
    pub advisor: Arc<StaticAdvisor>,
}

impl TestApp {
    pub fn new(store: MemoryStore, weather: StaticWeather, advisor: StaticAdvisor) -> Self {
        let store = Arc::new(store);
        let weather = Arc::new(weather);
        let advisor = Arc::new(advisor);

        let mut config = Config::default();
        config.environment = "test".to_string();
        config.jwt.secret = TEST_SECRET.to_string();

        let state = AppState {
            store: store.clone(),
            weather: weather.clone(),
            advisor: advisor.clone(),
            config: Arc::new(config),
        };

        Self {
            router: create_app(state),
            store,
            weather,
            advisor,
        }
    }

    /// App whose external collaborators are all offline
    pub fn offline() -> Self {
        Self::new(
            MemoryStore::default(),
            StaticWeather::unavailable(),
            StaticAdvisor::unavailable(),
        )
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, token).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body.to_string()), token)
            .await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body.to_string()), None)
            .await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

/// Sign a token for a user with the test secret
pub fn token_for(user_id: Uuid) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn snapshot(temperature: f64, humidity: f64, wind: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature_c: temperature,
        humidity_pct: humidity,
        description: "clear sky".to_string(),
        wind_speed_mps: wind,
        pressure_hpa: 1010.0,
        visibility_km: 8.0,
    }
}
