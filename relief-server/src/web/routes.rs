//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};

use crate::domain::{CongestionReading, Coord, InvalidCoord};
use crate::engine::EstimationResult;
use crate::guidance::GuidanceTarget;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status))
        .route("/api/lines", get(lines))
        .route("/api/stations", get(stations))
        .route("/api/nearest-station", post(nearest_station))
        .route("/api/estimate", post(estimate))
        .route("/api/congestion", get(congestion))
        .route("/api/guidance", post(guidance))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running",
        message: "Station relief finder is running",
    })
}

/// Catalog lines, without live data.
async fn lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let lines = state
        .engine
        .directory()
        .lines()
        .iter()
        .map(LineSummary::from_line)
        .collect();
    Json(LinesResponse { lines })
}

/// Stations of one line, or of every catalog line.
///
/// Resolution never fails; the origin of each line's data is reported.
async fn stations(
    State(state): State<AppState>,
    query: Result<Query<StationsQuery>, QueryRejection>,
) -> Result<Json<StationsResponse>, AppError> {
    let Query(req) = query?;
    let lines = match req.line.as_deref() {
        Some(line) => vec![state.engine.resolve_line_detailed(line).await],
        None => state.engine.resolve_all_lines().await,
    };
    Ok(Json(StationsResponse { lines }))
}

async fn nearest_station(
    State(state): State<AppState>,
    body: Result<Json<NearestRequest>, JsonRejection>,
) -> Result<Json<NearestResponse>, AppError> {
    let Json(req) = body?;
    let user = coord(req.lat, req.lng, "user")?;
    let nearest = state
        .engine
        .find_nearest_on_line(user, req.exclude.as_deref(), req.line.as_deref())
        .await;

    if nearest.is_none() {
        debug!(%user, "no station found");
    }
    Ok(Json(NearestResponse::from_nearest(nearest)))
}

async fn estimate(
    State(state): State<AppState>,
    body: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimationResult>, AppError> {
    let Json(req) = body?;
    let user = coord(req.lat, req.lng, "user")?;
    let target = coord(req.target_lat, req.target_lng, "target")?;
    Ok(Json(state.engine.build_estimation(user, target)))
}

async fn congestion(
    State(state): State<AppState>,
    query: Result<Query<CongestionQuery>, QueryRejection>,
) -> Result<Json<CongestionReading>, AppError> {
    let Query(req) = query?;
    let reading = match req.hour {
        Some(hour) if hour >= 24 => {
            return Err(AppError::BadRequest {
                message: format!("Hour out of range: {hour}"),
            });
        }
        Some(hour) => state.engine.classify_congestion(hour),
        None => state.engine.current_congestion(),
    };
    Ok(Json(reading))
}

async fn guidance(
    State(state): State<AppState>,
    body: Result<Json<GuidanceRequest>, JsonRejection>,
) -> Result<Json<GuidanceResponse>, AppError> {
    let Json(req) = body?;
    let user = coord(req.lat, req.lng, "user")?;

    let name = req.target_name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest {
            message: "Missing target_name".to_string(),
        });
    }

    let target_coord = match req.target_coord() {
        Some(parsed) => parsed.map_err(|e| invalid_coord("target", e))?,
        None => state
            .engine
            .directory()
            .station_by_name(name)
            .map(|s| s.coord())
            .ok_or_else(|| AppError::NotFound {
                message: format!("Unknown station: {name}"),
            })?,
    };

    let target = GuidanceTarget {
        name: name.to_string(),
        coord: target_coord,
    };
    let context = state
        .engine
        .guidance_context(user, target, req.line.as_deref())
        .await;
    let guidance = state.engine.plan_guidance(&context).await;

    Ok(Json(GuidanceResponse { guidance, context }))
}

fn coord(lat: f64, lng: f64, what: &str) -> Result<Coord, AppError> {
    Coord::new(lat, lng).map_err(|e| invalid_coord(what, e))
}

fn invalid_coord(what: &str, e: InvalidCoord) -> AppError {
    AppError::BadRequest {
        message: format!("Invalid {what} coordinates: {e}"),
    }
}

/// Application error type.
///
/// Every variant renders as a JSON `{error}` body.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
