//! Irrigation advice derived from a moisture estimate

use crate::locale;
use crate::models::{AdvisoryText, MoisturePrediction, Outcome};
use crate::types::Language;

/// Soil below this moisture percentage needs watering
pub const IRRIGATION_THRESHOLD_PCT: u8 = 40;

/// Locally computed irrigation advice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrrigationAdvice {
    pub irrigation_needed: bool,
    pub next_check: String,
}

/// Decide whether to irrigate and when to check again
pub fn advise_irrigation(moisture_pct: u8, lang: Language) -> IrrigationAdvice {
    IrrigationAdvice {
        irrigation_needed: moisture_pct < IRRIGATION_THRESHOLD_PCT,
        next_check: locale::next_check_hint(lang).to_string(),
    }
}

/// Fixed wording used when no external advisory is available
pub fn fallback_advisory(lang: Language) -> AdvisoryText {
    AdvisoryText {
        recommendation: locale::soil_monitoring_advice(lang).to_string(),
        next_check: locale::next_check_hint(lang).to_string(),
    }
}

/// Assemble the prediction from the local estimate and the advisory outcome
///
/// The advisory only supplies wording. Moisture and the irrigation decision
/// stay authoritative whichever branch the outcome took.
pub fn compose_prediction(
    moisture_pct: u8,
    lang: Language,
    advisory: Outcome<AdvisoryText>,
) -> MoisturePrediction {
    let advice = advise_irrigation(moisture_pct, lang);
    let source = advisory.source();
    let text = advisory.into_inner();

    MoisturePrediction {
        moisture_pct,
        irrigation_needed: advice.irrigation_needed,
        recommendation: text.recommendation,
        next_check: text.next_check,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdvisorySource;

    #[test]
    fn test_threshold_boundary() {
        assert!(advise_irrigation(39, Language::English).irrigation_needed);
        assert!(!advise_irrigation(40, Language::English).irrigation_needed);
        assert!(advise_irrigation(0, Language::English).irrigation_needed);
        assert!(!advise_irrigation(100, Language::English).irrigation_needed);
    }

    #[test]
    fn test_next_check_is_independent_of_moisture() {
        let dry = advise_irrigation(5, Language::English);
        let wet = advise_irrigation(95, Language::English);
        assert_eq!(dry.next_check, "In 24 hours");
        assert_eq!(dry.next_check, wet.next_check);

        assert_eq!(
            advise_irrigation(5, Language::Tamil).next_check,
            "24 மணி நேரத்தில்"
        );
    }

    #[test]
    fn test_fallback_composition() {
        let prediction = compose_prediction(
            44,
            Language::English,
            Outcome::Fallback(fallback_advisory(Language::English)),
        );

        assert_eq!(prediction.moisture_pct, 44);
        assert!(!prediction.irrigation_needed);
        assert_eq!(prediction.recommendation, "Monitor soil moisture levels.");
        assert_eq!(prediction.next_check, "In 24 hours");
        assert_eq!(prediction.source, AdvisorySource::Fallback);
    }

    #[test]
    fn test_external_text_replaces_wording_only() {
        let external = AdvisoryText {
            recommendation: "Irrigate the paddy tonight.".to_string(),
            next_check: "Tomorrow morning".to_string(),
        };

        let prediction = compose_prediction(25, Language::English, Outcome::External(external));

        assert_eq!(prediction.moisture_pct, 25);
        assert!(prediction.irrigation_needed);
        assert_eq!(prediction.recommendation, "Irrigate the paddy tonight.");
        assert_eq!(prediction.next_check, "Tomorrow morning");
        assert_eq!(prediction.source, AdvisorySource::External);
    }

    #[test]
    fn test_tamil_fallback_wording() {
        let text = fallback_advisory(Language::Tamil);
        assert_eq!(text.recommendation, "மண் ஈரப்பதத்தை கண்காணிக்கவும்.");
        assert_eq!(text.next_check, "24 மணி நேரத்தில்");
    }
}
