use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use common::errors::{AppError, ErrorResponse};
use common::models::WeatherSnapshot;
use std::sync::Arc;
use tracing::info;

use crate::gateway::WeatherGateway;
use crate::openapi;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<WeatherGateway>,
}

/// Routes plus swagger UI, without the tower layers added in `main`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/weather/{city}", get(get_weather))
        .merge(openapi::swagger_ui())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "weather-service" }))
}

#[utoipa::path(
    get,
    path = "/api/weather/{city}",
    params(
        ("city" = String, Path, description = "City name")
    ),
    responses(
        (status = 200, description = "Current weather for the city", body = WeatherSnapshot),
        (status = 400, description = "Blank city name", body = ErrorResponse),
        (status = 404, description = "City not known to the provider", body = ErrorResponse),
        (status = 502, description = "Provider failed or returned unusable data", body = ErrorResponse)
    ),
    tag = "weather"
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherSnapshot>, AppError> {
    info!(city = %city, "Weather request received");

    if city.trim().is_empty() {
        return Err(AppError::validation("City name must not be blank"));
    }

    let weather = state.gateway.fetch_weather(&city).await?;

    Ok(Json(weather))
}
