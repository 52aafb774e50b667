//! Error handling for the farm advisory service
//!
//! Provides consistent error responses in English and Tamil

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::InputError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_ta: String,
    },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // External service errors
    #[error("Weather service error: {0}")]
    WeatherService(String),

    #[error("Advisory service error: {0}")]
    AdvisoryService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_ta: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>, error_ta: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_ta: error_ta.into(),
            code: code.to_string(),
            field: None,
        }
    }

    fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::WeatherService(_) | AppError::AdvisoryService(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_)
            | AppError::DatabaseError(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::InvalidToken(_) => ErrorResponse::new(
                "INVALID_TOKEN",
                "Invalid or expired token",
                "டோக்கன் தவறானது அல்லது காலாவதியானது",
            ),
            AppError::Validation {
                field,
                message,
                message_ta,
            } => ErrorResponse::new("VALIDATION_ERROR", message.clone(), message_ta.clone())
                .with_field(field),
            AppError::InvalidBody(msg) => ErrorResponse::new(
                "INVALID_BODY",
                format!("Invalid request body: {}", msg),
                "கோரிக்கை தரவு தவறானது",
            ),
            AppError::WeatherService(_) => ErrorResponse::new(
                "WEATHER_SERVICE_ERROR",
                "Weather fetch failed",
                "வானிலை தகவலைப் பெற முடியவில்லை",
            ),
            AppError::AdvisoryService(_) => ErrorResponse::new(
                "ADVISORY_SERVICE_ERROR",
                "Advisory service failed",
                "ஆலோசனை சேவை தோல்வியடைந்தது",
            ),
            AppError::Configuration(_) => ErrorResponse::new(
                "CONFIGURATION_ERROR",
                "Service is misconfigured",
                "சேவை அமைப்பில் பிழை",
            ),
            AppError::DatabaseError(_) => ErrorResponse::new(
                "DATABASE_ERROR",
                "A database error occurred",
                "தரவுத்தள பிழை ஏற்பட்டது",
            ),
            AppError::Internal(_) => ErrorResponse::new(
                "INTERNAL_ERROR",
                "Request failed",
                "கோரிக்கை தோல்வியடைந்தது",
            ),
        };

        // Client errors are expected traffic, server errors carry the detail
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        let message_ta = match err {
            InputError::MissingLocation => "இடம் அல்லது ஆயத்தொலைவுகள் தேவை",
            InputError::LatitudeOutOfRange => "அட்சரேகை -90 முதல் 90 வரை இருக்க வேண்டும்",
            InputError::LongitudeOutOfRange => "தீர்க்கரேகை -180 முதல் 180 வரை இருக்க வேண்டும்",
        };
        AppError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
            message_ta: message_ta.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_map_to_bad_request() {
        let err: AppError = InputError::MissingLocation.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        match err {
            AppError::Validation { field, message, .. } => {
                assert_eq!(field, "location");
                assert_eq!(message, "Location or coordinates required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_server_errors_do_not_leak_details() {
        let response = AppError::Internal("connection refused to 10.0.0.5".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidToken("expired".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidBody("EOF".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::WeatherService("timeout".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
