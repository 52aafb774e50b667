//! HTTP handlers for weather advisory endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{resolve_weather_location, Language};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::Identity;
use crate::services::{WeatherAdvisoryService, WeatherReport};
use crate::AppState;

/// Query parameters for current weather
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    pub location: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub language: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: WeatherReport,
}

/// Current weather with farming recommendations
pub async fn current_weather(
    State(state): State<AppState>,
    identity: Identity,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> AppResult<Json<WeatherResponse>> {
    let Query(query) = query?;

    let location = resolve_weather_location(
        query.location.as_deref(),
        query.lat.as_deref(),
        query.lon.as_deref(),
    )?;
    let language = query
        .language
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();

    // An unparseable userId is treated as anonymous
    let claimed_user = query
        .user_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id.trim()).ok());
    let user_id = identity.or(claimed_user);

    let service = WeatherAdvisoryService::new(state.store.clone(), state.weather.clone());
    let report = service.current(location, language, user_id).await;

    Ok(Json(WeatherResponse {
        success: true,
        report,
    }))
}
