//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::InvalidDate;
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(temperature_observations))
        .route("/api/v1.0/:start_date", get(temperature_stats_from))
        .route("/api/v1.0/:start_date/:end_date", get(temperature_stats_range))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// JSON 404 for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        message: format!("no route for {}", uri.path()),
    }
}

/// Index page listing the routes.
async fn index_page() -> IndexTemplate {
    IndexTemplate::default()
}

/// Precipitation for the last year of data, keyed by date.
async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<PrecipitationResponse>, AppError> {
    let Some(cutoff) = state.window_start().await? else {
        return Ok(Json(PrecipitationResponse::new()));
    };

    let readings = state.store.precipitation_since(cutoff).await?;
    Ok(Json(precipitation_by_date(readings)))
}

/// All station identifiers.
async fn stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let ids = state.store.station_ids().await?;
    Ok(Json(ids))
}

/// Last year of temperature observations from the most active station.
async fn temperature_observations(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, AppError> {
    // No window start means no measurements at all.
    let cutoff = state
        .window_start()
        .await?
        .ok_or(StoreError::NoActiveStation)?;

    let readings = state
        .store
        .temperature_observations_for_most_active_station(cutoff)
        .await?;

    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// Temperature stats for every date from `start_date` on.
async fn temperature_stats_from(
    State(state): State<AppState>,
    Path(start_date): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, AppError> {
    state.config.date_params.check(&start_date)?;

    let summary = state.store.temperature_stats_from(&start_date).await?;
    Ok(Json(TemperatureStats::singleton(summary)))
}

/// Temperature stats between `start_date` and `end_date`, inclusive.
async fn temperature_stats_range(
    State(state): State<AppState>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, AppError> {
    state.config.date_params.check(&start_date)?;
    state.config.date_params.check(&end_date)?;

    let summary = state
        .store
        .temperature_stats_range(&start_date, &end_date)
        .await?;
    Ok(Json(TemperatureStats::singleton(summary)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<InvalidDate> for AppError {
    fn from(e: InvalidDate) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
