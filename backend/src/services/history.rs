//! Prediction and recommendation history
//!
//! Rows are append-only. Handlers treat every write here as best-effort.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::PageSize;

use crate::error::AppResult;

/// Persistence boundary for advisory history
#[axum::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a soil prediction for a user
    async fn record_soil_prediction(
        &self,
        entry: NewSoilPrediction,
    ) -> AppResult<SoilPredictionRecord>;

    /// Most recent predictions for a user, newest first
    async fn recent_soil_predictions(
        &self,
        user_id: Uuid,
        limit: PageSize,
    ) -> AppResult<Vec<SoilPredictionRecord>>;

    /// Append a weather recommendation summary
    async fn record_weather_recommendation(
        &self,
        entry: NewWeatherRecommendation,
    ) -> AppResult<Uuid>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Stored soil prediction
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoilPredictionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub crop_type: String,
    pub season: String,
    pub predicted_moisture: i32,
    pub recommendation: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
}

/// Input for appending a soil prediction
#[derive(Debug, Clone, PartialEq)]
pub struct NewSoilPrediction {
    pub user_id: Uuid,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub crop_type: String,
    pub season: String,
    pub predicted_moisture: i32,
    pub recommendation: String,
    pub language: String,
}

/// Input for appending a weather recommendation summary
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeatherRecommendation {
    pub user_id: Option<Uuid>,
    pub location: String,
    pub weather_data: serde_json::Value,
    pub recommendation: String,
    pub language: String,
}

/// PostgreSQL-backed history store
#[derive(Clone)]
pub struct PgHistoryStore {
    db: PgPool,
}

impl PgHistoryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[axum::async_trait]
impl HistoryStore for PgHistoryStore {
    async fn record_soil_prediction(
        &self,
        entry: NewSoilPrediction,
    ) -> AppResult<SoilPredictionRecord> {
        let record = sqlx::query_as::<_, SoilPredictionRecord>(
            r#"
            INSERT INTO soil_predictions (
                user_id, temperature, humidity, rainfall, crop_type, season,
                predicted_moisture, recommendation, language
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, temperature, humidity, rainfall, crop_type, season,
                      predicted_moisture, recommendation, language, created_at
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.temperature)
        .bind(entry.humidity)
        .bind(entry.rainfall)
        .bind(&entry.crop_type)
        .bind(&entry.season)
        .bind(entry.predicted_moisture)
        .bind(&entry.recommendation)
        .bind(&entry.language)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    async fn recent_soil_predictions(
        &self,
        user_id: Uuid,
        limit: PageSize,
    ) -> AppResult<Vec<SoilPredictionRecord>> {
        let records = sqlx::query_as::<_, SoilPredictionRecord>(
            r#"
            SELECT id, user_id, temperature, humidity, rainfall, crop_type, season,
                   predicted_moisture, recommendation, language, created_at
            FROM soil_predictions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit.get())
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    async fn record_weather_recommendation(
        &self,
        entry: NewWeatherRecommendation,
    ) -> AppResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO weather_recommendations (user_id, location, weather_data, recommendation, language)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.location)
        .bind(&entry.weather_data)
        .bind(&entry.recommendation)
        .bind(&entry.language)
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}
