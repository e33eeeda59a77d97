//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::routing::HealthStatus;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/routing", get(routing_health))
        .route("/plan", post(plan))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Routing engine health, as reported by the engine itself.
async fn routing_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.routing.health_check().await)
}

/// Run the planning pipeline for one query.
///
/// Pipeline failures still produce a 200 with `error` set; only a
/// malformed request is rejected.
async fn plan(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest {
            message: "query must not be empty".to_string(),
        });
    }

    let config = state
        .config
        .with_overrides(req.walking_cutoff_meters, req.max_transfers, req.top_k)?;

    let ctx = state.pipeline.run(query, config).await;
    Ok(Json(PlanResponse::from(ctx)))
}
