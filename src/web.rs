//! HTTP API surface.
//!
//! Serves the dashboard endpoints: current reading, forecast, health risk
//! assessment and spatial summaries. Location path segments are validated
//! against the whitelist; invalid input is a 400 with a readable message,
//! never a silent fallback.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

use crate::AeroGuardError;
use crate::config::AeroGuardConfig;
use crate::health_risk::{self, HealthRiskAssessment, HealthRiskRequest};
use crate::locations::MonitoredLocation;
use crate::models::{ApiEnvelope, CurrentAqiResponse, ForecastResponse};
use crate::session::resolve_once;
use crate::sources::SourceChain;
use crate::spatial::{self, SpatialSummary};
use crate::synthetic;

/// Shared handler state.
pub struct AppState {
    pub chain: SourceChain,
    pub config: AeroGuardConfig,
}

impl IntoResponse for AeroGuardError {
    fn into_response(self) -> Response {
        let status = match self {
            AeroGuardError::Validation { .. } => StatusCode::BAD_REQUEST,
            AeroGuardError::Api { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({ "success": false, "error": self.user_message() }));
        (status, body).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/current-aqi/{location}", get(get_current_aqi))
        .route("/forecast-aqi/{location}", get(get_forecast_aqi))
        .route("/health-risk", post(post_health_risk))
        .route("/spatial/{location}", get(get_spatial_summary))
        .with_state(state)
}

/// Run the HTTP server until shutdown.
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let port = state.config.server.port;
    let request_timeout = std::time::Duration::from_secs(30);
    let app = router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("AeroGuard API listening on http://localhost:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_health() -> Json<serde_json::Value> {
    let locations: Vec<&'static str> = MonitoredLocation::ALL.iter().map(|l| l.name()).collect();
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "version": crate::VERSION,
            "locations": locations,
        }
    }))
}

async fn get_current_aqi(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
) -> Result<Json<ApiEnvelope<CurrentAqiResponse>>, AeroGuardError> {
    let (location, reading) = resolve_once(&state.chain, &location).await?;
    Ok(Json(ApiEnvelope::ok(CurrentAqiResponse::new(
        location, reading,
    ))))
}

#[derive(Debug, Deserialize)]
struct ForecastParams {
    hours: Option<u32>,
}

async fn get_forecast_aqi(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ApiEnvelope<ForecastResponse>>, AeroGuardError> {
    // Out-of-range horizons clamp rather than error.
    let hours = params
        .hours
        .unwrap_or(state.config.server.forecast_hours)
        .clamp(1, 24);

    let (location, reading) = resolve_once(&state.chain, &location).await?;
    // An empty reading carries no usable baseline; fall back to the
    // location's static one.
    let base_aqi = if reading.is_empty() {
        location.base_aqi()
    } else {
        reading.aqi
    };

    let now = Utc::now();
    Ok(Json(ApiEnvelope::ok(ForecastResponse {
        location: location.name(),
        base_aqi,
        hours,
        generated_at: now,
        forecast: synthetic::forecast(base_aqi, hours, now),
    })))
}

async fn post_health_risk(
    Json(request): Json<HealthRiskRequest>,
) -> Result<Json<ApiEnvelope<HealthRiskAssessment>>, AeroGuardError> {
    let assessment = health_risk::assess(&request)?;
    Ok(Json(ApiEnvelope::ok(assessment)))
}

async fn get_spatial_summary(
    Path(location): Path<String>,
) -> Result<Json<ApiEnvelope<SpatialSummary>>, AeroGuardError> {
    let location = MonitoredLocation::parse(&location)?;
    Ok(Json(ApiEnvelope::ok(spatial::summarize(location))))
}
