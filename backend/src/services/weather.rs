//! Current weather and farming recommendations

use std::sync::Arc;

use serde::Serialize;
use shared::{
    build_recommendations, summarize_recommendations, AdvisorySource, FarmingRecommendation,
    Language, Outcome, WeatherLocation, WeatherSnapshot,
};
use uuid::Uuid;

use crate::external::weather::{ObservedWeather, WeatherProvider};
use crate::services::history::{HistoryStore, NewWeatherRecommendation};

/// Weather reading with the recommendations derived from it
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub weather: WeatherSnapshot,
    pub location: String,
    pub recommendations: Vec<FarmingRecommendation>,
    #[serde(skip)]
    pub source: AdvisorySource,
}

/// Service producing weather-based farming advice
#[derive(Clone)]
pub struct WeatherAdvisoryService {
    store: Arc<dyn HistoryStore>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherAdvisoryService {
    pub fn new(store: Arc<dyn HistoryStore>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { store, provider }
    }

    /// Current conditions and recommendations for a location
    ///
    /// When the provider fails a placeholder reading is used so the farmer
    /// still receives general advice.
    pub async fn current(
        &self,
        location: WeatherLocation,
        language: Language,
        user_id: Option<Uuid>,
    ) -> WeatherReport {
        let observed = match self.provider.current_weather(&location).await {
            Ok(observed) => Outcome::External(observed),
            Err(e) => {
                tracing::warn!(error = %e, "Weather provider unavailable, using placeholder reading");
                Outcome::Fallback(ObservedWeather {
                    snapshot: WeatherSnapshot::placeholder(),
                    location_name: location.fallback_name(),
                })
            }
        };

        let source = observed.source();
        let ObservedWeather {
            snapshot,
            location_name,
        } = observed.into_inner();

        let recommendations = build_recommendations(&snapshot, language);
        tracing::debug!(
            location = %location_name,
            source = ?source,
            count = recommendations.len(),
            "Weather recommendations built"
        );

        let entry = NewWeatherRecommendation {
            user_id,
            location: location_name.clone(),
            weather_data: serde_json::to_value(&snapshot).unwrap_or_default(),
            recommendation: summarize_recommendations(&recommendations),
            language: language.code().to_string(),
        };
        if let Err(e) = self.store.record_weather_recommendation(entry).await {
            tracing::error!(error = %e, location = %location_name, "Failed to save weather recommendation");
        }

        WeatherReport {
            weather: snapshot,
            location: location_name,
            recommendations,
            source,
        }
    }
}
