//! WebAssembly module for the Farm Advisory Platform
//!
//! Lets the web client work offline:
//! - Soil moisture estimates and irrigation advice
//! - Weather-based farming recommendations
//! - Weather query validation before a request is sent

use wasm_bindgen::prelude::*;

use shared::{
    advise_irrigation, build_recommendations, compose_prediction, estimate_for,
    fallback_advisory, resolve_weather_location, Language, Outcome, SoilInputs, WeatherSnapshot,
};

/// Estimate soil moisture percentage from field readings
#[wasm_bindgen]
pub fn estimate_soil_moisture(temperature: f64, humidity: f64, rainfall: f64) -> u8 {
    shared::estimate_moisture(temperature, humidity, rainfall)
}

/// Whether soil at this moisture level needs watering
#[wasm_bindgen]
pub fn irrigation_needed(moisture: u8) -> bool {
    advise_irrigation(moisture, Language::English).irrigation_needed
}

/// Full offline prediction with local wording, as JSON
///
/// `inputs_json` uses the same shape as the soil prediction request body.
#[wasm_bindgen]
pub fn predict_soil_offline(inputs_json: &str, language: &str) -> Result<String, JsValue> {
    let inputs: SoilInputs = serde_json::from_str(inputs_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid soil readings JSON: {}", e)))?;
    let language = Language::from_code(language);

    let prediction = compose_prediction(
        estimate_for(&inputs),
        language,
        Outcome::Fallback(fallback_advisory(language)),
    );

    serde_json::to_string(&prediction).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Farming recommendations for a weather reading, as a JSON array
#[wasm_bindgen]
pub fn weather_recommendations_json(snapshot_json: &str, language: &str) -> Result<String, JsValue> {
    let snapshot: WeatherSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid weather JSON: {}", e)))?;

    let recommendations = build_recommendations(&snapshot, Language::from_code(language));
    serde_json::to_string(&recommendations).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validation message for a weather query, `None` when it can be sent
#[wasm_bindgen]
pub fn weather_query_error(
    location: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
) -> Option<String> {
    resolve_weather_location(location.as_deref(), lat.as_deref(), lon.as_deref())
        .err()
        .map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_soil_moisture() {
        assert_eq!(estimate_soil_moisture(30.0, 70.0, 5.0), 44);
        assert_eq!(estimate_soil_moisture(35.0, 0.0, 0.0), 0);
        assert_eq!(estimate_soil_moisture(35.0, 100.0, 100.0), 90);
    }

    #[test]
    fn test_irrigation_boundary() {
        assert!(irrigation_needed(39));
        assert!(!irrigation_needed(40));
    }

    #[test]
    fn test_predict_soil_offline() {
        let json = predict_soil_offline(
            r#"{"temperature": "30", "humidity": 70, "rainfall": 5, "cropType": "rice"}"#,
            "ta",
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["moistureLevel"], 44);
        assert_eq!(value["irrigationNeeded"], false);
        assert_eq!(value["nextCheck"], "24 மணி நேரத்தில்");
    }

    #[test]
    fn test_weather_recommendations_json() {
        let json = weather_recommendations_json(
            r#"{"temperature": 36, "humidity": 85, "description": "haze", "windSpeed": 12, "pressure": 1008, "visibility": 5}"#,
            "en",
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let titles: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();

        assert_eq!(
            titles,
            vec![
                "High Temperature Alert",
                "High Humidity - Fungal Risk",
                "High Wind Alert",
                "Daily Monitoring",
            ]
        );
    }

    #[test]
    fn test_weather_query_error() {
        assert_eq!(
            weather_query_error(None, Some("13.08".into()), None).as_deref(),
            Some("Location or coordinates required")
        );
        assert!(weather_query_error(Some("Chennai".into()), None, None).is_none());
        assert!(weather_query_error(None, Some("13.08".into()), Some("80.27".into())).is_none());
    }
}
