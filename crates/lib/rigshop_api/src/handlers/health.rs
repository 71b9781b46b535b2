//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /api/health` — crate version and database connectivity.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let db_connected = rigshop_core::db::ping(&state.pool).await;
    if !db_connected {
        warn!("health check: database unreachable");
    }
    Ok(Json(HealthResponse {
        status: if db_connected { "ok" } else { "degraded" }.to_string(),
        version: rigshop_core::version().to_string(),
        db_connected,
    }))
}
