//! Localized phrase catalog
//!
//! Every user-facing advisory string lives here, keyed by what it describes
//! and the requested language.

use crate::advisory::WeatherCondition;
use crate::types::Language;

/// Title and body of a weather recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    pub title: &'static str,
    pub description: &'static str,
}

/// Wording for a weather rule
pub fn condition_phrase(condition: WeatherCondition, lang: Language) -> Phrase {
    use Language::{English, Tamil};
    use WeatherCondition::*;

    match (condition, lang) {
        (Heat, English) => Phrase {
            title: "High Temperature Alert",
            description: "Use shade nets for crops. Water early morning or evening. Apply foliar spray to cool plants.",
        },
        (Heat, Tamil) => Phrase {
            title: "அதிக வெப்பநிலை எச்சரிக்கை",
            description: "பயிர்களுக்கு நிழல் வலை பயன்படுத்தவும். அதிகாலை அல்லது மாலையில் நீர் கொடுக்கவும். இலைகளில் நீர் தெளிக்கவும்.",
        },
        (Cold, English) => Phrase {
            title: "Cold Protection",
            description: "Use plastic covers to protect crops from cold. Watch for frost warnings.",
        },
        (Cold, Tamil) => Phrase {
            title: "குளிர் பாதுகாப்பு",
            description: "பயிர்களை குளிரிலிருந்து பாதுகாக்க பிளாஸ்டிக் கவர் பயன்படுத்தவும். உறைபனி எச்சரிக்கை கவனிக்கவும்.",
        },
        (HighHumidity, English) => Phrase {
            title: "High Humidity - Fungal Risk",
            description: "Monitor for fungal diseases. Improve air circulation. Apply preventive fungicide.",
        },
        (HighHumidity, Tamil) => Phrase {
            title: "அதிக ஈரப்பதம் - பூஞ்சை எச்சரிக்கை",
            description: "பூஞ்சை நோய்களுக்கு கவனம் செலுத்தவும். காற்றோட்டம் மேம்படுத்தவும். தடுப்பு மருந்து தெளிக்கவும்.",
        },
        (LowHumidity, English) => Phrase {
            title: "Low Humidity",
            description: "Increase watering frequency. Use mulch to retain soil moisture.",
        },
        (LowHumidity, Tamil) => Phrase {
            title: "குறைந்த ஈரப்பதம்",
            description: "அடிக்கடி நீர் கொடுக்கவும். மண்ணில் ஈரப்பதம் தக்கவைக்க மல்ச் பயன்படுத்தவும்.",
        },
        (HighWind, English) => Phrase {
            title: "High Wind Alert",
            description: "Provide support for tall crops. Watch for leaf damage. Plant windbreaks.",
        },
        (HighWind, Tamil) => Phrase {
            title: "அதிக காற்று எச்சரிக்கை",
            description: "உயரமான பயிர்களுக்கு ஆதரவு கொடுக்கவும். இலை சேதம் கவனிக்கவும். காற்று தடுப்பு நடவும்.",
        },
        (DailyMonitoring, English) => Phrase {
            title: "Daily Monitoring",
            description: "Check crop health, pests, and disease symptoms daily.",
        },
        (DailyMonitoring, Tamil) => Phrase {
            title: "தினசரி கண்காணிப்பு",
            description: "பயிர்களின் ஆரோக்கியம், பூச்சிகள், நோய் அறிகுறிகளை தினமும் சரிபார்க்கவும்.",
        },
    }
}

/// Default soil recommendation
pub fn soil_monitoring_advice(lang: Language) -> &'static str {
    match lang {
        Language::English => "Monitor soil moisture levels.",
        Language::Tamil => "மண் ஈரப்பதத்தை கண்காணிக்கவும்.",
    }
}

/// When the farmer should check the soil again
pub fn next_check_hint(lang: Language) -> &'static str {
    match lang {
        Language::English => "In 24 hours",
        Language::Tamil => "24 மணி நேரத்தில்",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::RULE_TABLE;

    #[test]
    fn test_every_condition_has_both_languages() {
        for condition in RULE_TABLE {
            let en = condition_phrase(condition, Language::English);
            let ta = condition_phrase(condition, Language::Tamil);

            assert!(!en.title.is_empty() && !en.description.is_empty());
            assert!(!ta.title.is_empty() && !ta.description.is_empty());
            assert_ne!(en.title, ta.title);
        }
    }

    #[test]
    fn test_tamil_phrases_use_tamil_script() {
        let is_tamil = |s: &str| s.chars().any(|c| ('\u{0B80}'..='\u{0BFF}').contains(&c));

        for condition in RULE_TABLE {
            assert!(is_tamil(condition_phrase(condition, Language::Tamil).title));
        }
        assert!(is_tamil(soil_monitoring_advice(Language::Tamil)));
        assert!(!is_tamil(next_check_hint(Language::English)));
    }
}
