//! HTTP handlers for soil moisture endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{Language, MoisturePrediction, PageSize, SoilInputs};

use crate::error::AppResult;
use crate::middleware::Identity;
use crate::services::history::SoilPredictionRecord;
use crate::services::SoilAdvisoryService;
use crate::AppState;

/// Body of a soil prediction request
#[derive(Debug, Deserialize)]
pub struct SoilPredictRequest {
    #[serde(flatten)]
    pub inputs: SoilInputs,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
pub struct SoilPredictResponse {
    pub success: bool,
    pub prediction: MoisturePrediction,
}

/// Predict soil moisture and irrigation needs
pub async fn predict_soil(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<SoilPredictRequest>, JsonRejection>,
) -> AppResult<Json<SoilPredictResponse>> {
    let Json(request) = body?;
    let language = request.language.unwrap_or_default();

    let service = SoilAdvisoryService::new(state.store.clone(), state.advisor.clone());
    let prediction = service
        .predict(request.inputs, language, identity.user_id())
        .await;

    Ok(Json(SoilPredictResponse {
        success: true,
        prediction,
    }))
}

/// Query parameters for prediction history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SoilHistoryResponse {
    pub success: bool,
    pub history: Vec<SoilPredictionRecord>,
}

/// List the caller's recent soil predictions
pub async fn soil_history(
    State(state): State<AppState>,
    identity: Identity,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<SoilHistoryResponse>> {
    let Query(query) = query?;
    let limit = PageSize::clamp(
        query.limit,
        state.config.history.default_page_size,
        state.config.history.max_page_size,
    );

    let service = SoilAdvisoryService::new(state.store.clone(), state.advisor.clone());
    let history = service.history(identity.user_id(), limit).await?;

    Ok(Json(SoilHistoryResponse {
        success: true,
        history,
    }))
}
