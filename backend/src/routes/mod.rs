//! Route definitions for the farm advisory API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/soil", soil_routes())
        .nest("/weather", weather_routes())
}

/// Soil moisture routes
fn soil_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(handlers::predict_soil))
        .route("/history", get(handlers::soil_history))
}

/// Weather advisory routes
fn weather_routes() -> Router<AppState> {
    Router::new().route("/current", get(handlers::current_weather))
}
