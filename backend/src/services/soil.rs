//! Soil moisture prediction service

use std::sync::Arc;

use shared::{
    compose_prediction, estimate_for, fallback_advisory, Language, MoisturePrediction, Outcome,
    PageSize, SoilInputs,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::external::advisory::{AdvisoryGenerator, AdvisoryRequest};
use crate::services::history::{HistoryStore, NewSoilPrediction, SoilPredictionRecord};

/// Service combining the local estimate, optional enrichment and history
#[derive(Clone)]
pub struct SoilAdvisoryService {
    store: Arc<dyn HistoryStore>,
    advisor: Arc<dyn AdvisoryGenerator>,
}

impl SoilAdvisoryService {
    pub fn new(store: Arc<dyn HistoryStore>, advisor: Arc<dyn AdvisoryGenerator>) -> Self {
        Self { store, advisor }
    }

    /// Predict soil moisture and phrase a recommendation
    ///
    /// Never fails: enrichment and persistence problems are logged and the
    /// locally computed prediction is returned.
    pub async fn predict(
        &self,
        inputs: SoilInputs,
        language: Language,
        user_id: Option<Uuid>,
    ) -> MoisturePrediction {
        let moisture_pct = estimate_for(&inputs);

        let request = AdvisoryRequest {
            inputs,
            moisture_pct,
            language,
        };

        let advisory = match self.advisor.soil_advisory(&request).await {
            Ok(text) => Outcome::External(text),
            Err(e) => {
                tracing::warn!(error = %e, "Soil advisory unavailable, using local wording");
                Outcome::Fallback(fallback_advisory(language))
            }
        };

        let prediction = compose_prediction(moisture_pct, language, advisory);

        tracing::debug!(
            moisture = prediction.moisture_pct,
            irrigation_needed = prediction.irrigation_needed,
            source = ?prediction.source,
            "Soil moisture predicted"
        );

        if let Some(user_id) = user_id {
            self.persist(user_id, &request, &prediction).await;
        }

        prediction
    }

    /// A user's recent predictions, newest first
    ///
    /// Anonymous callers have no history.
    pub async fn history(
        &self,
        user_id: Option<Uuid>,
        limit: PageSize,
    ) -> AppResult<Vec<SoilPredictionRecord>> {
        match user_id {
            Some(user_id) => self.store.recent_soil_predictions(user_id, limit).await,
            None => Ok(Vec::new()),
        }
    }

    async fn persist(
        &self,
        user_id: Uuid,
        request: &AdvisoryRequest,
        prediction: &MoisturePrediction,
    ) {
        let entry = NewSoilPrediction {
            user_id,
            temperature: request.inputs.temperature_c,
            humidity: request.inputs.humidity_pct,
            rainfall: request.inputs.rainfall_mm,
            crop_type: request.inputs.crop_type.clone(),
            season: request.inputs.season.clone(),
            predicted_moisture: i32::from(prediction.moisture_pct),
            recommendation: prediction.recommendation.clone(),
            language: request.language.code().to_string(),
        };

        if let Err(e) = self.store.record_soil_prediction(entry).await {
            tracing::error!(error = %e, %user_id, "Failed to save soil prediction");
        }
    }
}
