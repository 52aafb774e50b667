//! Farm Advisory Platform - Backend
//!
//! Soil moisture and weather advice for farmers in English and Tamil.
//! The binary in `main.rs` wires configuration, the database pool and the
//! external clients into [`AppState`] and serves [`create_app`].

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{AdvisoryGenerator, WeatherProvider};
use services::HistoryStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HistoryStore>,
    pub weather: Arc<dyn WeatherProvider>,
    pub advisor: Arc<dyn AdvisoryGenerator>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
