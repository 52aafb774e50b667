//! Text-generation client for soil recommendations
//!
//! Talks to an OpenAI-compatible chat completions API (Groq by default) in
//! JSON mode. The reply only supplies wording; moisture and the irrigation
//! decision are never taken from it.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{AdvisoryText, Language, SoilInputs};

use crate::config::AdvisoryConfig;
use crate::error::{AppError, AppResult};

/// Context handed to the advisory generator
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryRequest {
    pub inputs: SoilInputs,
    pub moisture_pct: u8,
    pub language: Language,
}

/// Produces natural-language soil recommendations
#[axum::async_trait]
pub trait AdvisoryGenerator: Send + Sync {
    /// Phrase a recommendation for the given conditions
    async fn soil_advisory(&self, request: &AdvisoryRequest) -> AppResult<AdvisoryText>;
}

/// Client for the chat completions API
#[derive(Clone)]
pub struct AdvisoryClient {
    http_client: Client,
    api_endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// JSON object the model is asked to produce
#[derive(Debug, Deserialize)]
struct SoilAdvisoryPayload {
    recommendation: Option<String>,
    next_check: Option<String>,
}

impl AdvisoryClient {
    /// Create a new advisory client
    pub fn new(
        api_endpoint: String,
        api_key: String,
        model: String,
        temperature: f32,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            api_key,
            model,
            temperature,
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &AdvisoryConfig) -> AppResult<Self> {
        Self::new(
            config.api_endpoint.clone(),
            config.api_key.clone(),
            config.model.clone(),
            config.temperature,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Ask the model for a soil recommendation
    pub async fn generate(&self, request: &AdvisoryRequest) -> AppResult<AdvisoryText> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "Advisory API key not configured".to_string(),
            ));
        }

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(request),
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.api_endpoint))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AdvisoryService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AdvisoryService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::AdvisoryService(format!("Failed to parse response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::AdvisoryService("Empty completion".to_string()))?;

        parse_advisory(&content)
    }
}

#[axum::async_trait]
impl AdvisoryGenerator for AdvisoryClient {
    async fn soil_advisory(&self, request: &AdvisoryRequest) -> AppResult<AdvisoryText> {
        self.generate(request).await
    }
}

/// Build the prompt describing the field conditions
pub fn build_prompt(request: &AdvisoryRequest) -> String {
    let inputs = &request.inputs;
    let language = request.language.display_name();

    format!(
        "You are a soil expert. Provide a concise agricultural recommendation for a farmer.\n\
         Current Conditions:\n\
         - Temperature: {}°C\n\
         - Humidity: {}%\n\
         - Rainfall: {}mm\n\
         - Crop: {}\n\
         - Season: {}\n\
         - Estimated Soil Moisture: {}%\n\
         \n\
         Respond only in JSON:\n\
         {{\n\
           \"recommendation\": \"Recommendation in {}\",\n\
           \"irrigation_needed\": boolean,\n\
           \"next_check\": \"Timeframe in {}\"\n\
         }}",
        inputs.temperature_c,
        inputs.humidity_pct,
        inputs.rainfall_mm,
        inputs.crop_type,
        inputs.season,
        request.moisture_pct,
        language,
        language,
    )
}

/// Extract the advisory wording from the model's JSON reply
///
/// Both `recommendation` and `next_check` must be non-blank strings.
pub fn parse_advisory(content: &str) -> AppResult<AdvisoryText> {
    let payload: SoilAdvisoryPayload = serde_json::from_str(content)
        .map_err(|e| AppError::AdvisoryService(format!("Malformed advisory JSON: {}", e)))?;

    let recommendation = payload
        .recommendation
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let next_check = payload
        .next_check
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match (recommendation, next_check) {
        (Some(recommendation), Some(next_check)) => Ok(AdvisoryText {
            recommendation,
            next_check,
        }),
        _ => Err(AppError::AdvisoryService(
            "Advisory reply is missing recommendation or next_check".to_string(),
        )),
    }
}
