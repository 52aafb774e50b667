//! Weather rule engine
//!
//! Maps a weather snapshot to farming recommendations through a fixed
//! threshold table. Rows are evaluated independently and emitted in table
//! order; the daily-monitoring row always fires and always comes last.

use crate::locale;
use crate::models::{FarmingRecommendation, Priority, RecommendationCategory, WeatherSnapshot};
use crate::types::Language;

/// Above this temperature (°C) crops need heat protection
pub const HEAT_THRESHOLD_C: f64 = 35.0;
/// Below this temperature (°C) crops need cold protection
pub const COLD_THRESHOLD_C: f64 = 15.0;
/// Above this relative humidity (%) fungal disease risk rises
pub const HUMID_THRESHOLD_PCT: f64 = 80.0;
/// Below this relative humidity (%) soil dries out quickly
pub const DRY_THRESHOLD_PCT: f64 = 40.0;
/// Above this wind speed (m/s) tall crops need support
pub const WIND_THRESHOLD_MPS: f64 = 10.0;

/// A row of the rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Heat,
    Cold,
    HighHumidity,
    LowHumidity,
    HighWind,
    DailyMonitoring,
}

/// Rule table in output order
pub const RULE_TABLE: [WeatherCondition; 6] = [
    WeatherCondition::Heat,
    WeatherCondition::Cold,
    WeatherCondition::HighHumidity,
    WeatherCondition::LowHumidity,
    WeatherCondition::HighWind,
    WeatherCondition::DailyMonitoring,
];

impl WeatherCondition {
    pub fn category(self) -> RecommendationCategory {
        match self {
            WeatherCondition::Heat | WeatherCondition::Cold => RecommendationCategory::Temperature,
            WeatherCondition::HighHumidity | WeatherCondition::LowHumidity => {
                RecommendationCategory::Humidity
            }
            WeatherCondition::HighWind => RecommendationCategory::Wind,
            WeatherCondition::DailyMonitoring => RecommendationCategory::General,
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            WeatherCondition::Heat | WeatherCondition::Cold | WeatherCondition::HighWind => {
                Priority::High
            }
            WeatherCondition::HighHumidity | WeatherCondition::LowHumidity => Priority::Medium,
            WeatherCondition::DailyMonitoring => Priority::Low,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WeatherCondition::Heat => "🌡️",
            WeatherCondition::Cold => "❄️",
            WeatherCondition::HighHumidity => "💧",
            WeatherCondition::LowHumidity => "🏜️",
            WeatherCondition::HighWind => "💨",
            WeatherCondition::DailyMonitoring => "👁️",
        }
    }

    /// Whether this row fires for the snapshot (all thresholds are strict)
    pub fn applies(self, snapshot: &WeatherSnapshot) -> bool {
        match self {
            WeatherCondition::Heat => snapshot.temperature_c > HEAT_THRESHOLD_C,
            WeatherCondition::Cold => snapshot.temperature_c < COLD_THRESHOLD_C,
            WeatherCondition::HighHumidity => snapshot.humidity_pct > HUMID_THRESHOLD_PCT,
            WeatherCondition::LowHumidity => snapshot.humidity_pct < DRY_THRESHOLD_PCT,
            WeatherCondition::HighWind => snapshot.wind_speed_mps > WIND_THRESHOLD_MPS,
            WeatherCondition::DailyMonitoring => true,
        }
    }

    pub fn recommendation(self, lang: Language) -> FarmingRecommendation {
        let phrase = locale::condition_phrase(self, lang);
        FarmingRecommendation {
            category: self.category(),
            title: phrase.title.to_string(),
            description: phrase.description.to_string(),
            priority: self.priority(),
            icon: self.icon().to_string(),
        }
    }
}

/// Build the ordered recommendations for a snapshot
pub fn build_recommendations(
    snapshot: &WeatherSnapshot,
    lang: Language,
) -> Vec<FarmingRecommendation> {
    RULE_TABLE
        .iter()
        .copied()
        .filter(|condition| condition.applies(snapshot))
        .map(|condition| condition.recommendation(lang))
        .collect()
}

/// Flatten recommendations to the summary stored alongside a snapshot
pub fn summarize_recommendations(recommendations: &[FarmingRecommendation]) -> String {
    recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
