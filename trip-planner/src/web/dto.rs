//! Data transfer objects for web requests and responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ConfigError;
use crate::domain::{Coord, Journey};
use crate::pipeline::{ErrorKind, RequestContext};

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Free-text query, e.g. "عايز اروح من الرمل لسيدي جابر"
    pub query: String,

    pub walking_cutoff_meters: Option<f64>,
    pub max_transfers: Option<u32>,
    pub top_k: Option<usize>,
}

/// Outcome of a planning request.
///
/// Pipeline failures are reported in `error`; `final_answer` is always
/// present.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub origin_coord: Option<Coord>,
    pub destination_coord: Option<Coord>,
    /// Number of journeys in `journeys`
    pub journey_count: usize,
    /// Ranked journeys with decoded paths
    pub journeys: Vec<Journey>,
    pub final_answer: String,
    pub error: Option<ErrorKind>,
}

impl From<RequestContext> for PlanResponse {
    fn from(ctx: RequestContext) -> Self {
        let final_answer = ctx
            .final_answer()
            .map(str::to_string)
            .or_else(|| ctx.error().map(|e| e.fallback_message().to_string()))
            .unwrap_or_default();

        PlanResponse {
            error: ctx.error(),
            origin_coord: ctx.origin_coord,
            destination_coord: ctx.destination_coord,
            journey_count: ctx.ranked_journeys.len(),
            journeys: ctx.ranked_journeys,
            origin: ctx.origin,
            destination: ctx.destination,
            final_answer,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
