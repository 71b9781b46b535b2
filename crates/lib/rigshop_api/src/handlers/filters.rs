//! Product filter definition handlers.

use axum::Json;
use axum::extract::{Path, State};
use rigshop_core::catalog::filters;
use rigshop_core::models::filter::{FilterDefinition, FilterInput};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{MessageResponse, ToggleRequest};

fn not_found() -> AppError {
    AppError::NotFound("Filter not found".into())
}

/// `GET /api/product-filters` — active filters for the storefront.
pub async fn list_active_filters_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FilterDefinition>>> {
    Ok(Json(filters::list_active_filters(&state.pool).await?))
}

/// `GET /api/admin/product-filters`
pub async fn list_filters_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FilterDefinition>>> {
    Ok(Json(filters::list_filters(&state.pool).await?))
}

/// `POST /api/admin/product-filters`
pub async fn create_filter_handler(
    State(state): State<AppState>,
    Json(body): Json<FilterInput>,
) -> AppResult<Json<FilterDefinition>> {
    Ok(Json(filters::create_filter(&state.pool, &body).await?))
}

/// `PUT /api/admin/product-filters/{id}`
pub async fn update_filter_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<FilterInput>,
) -> AppResult<Json<MessageResponse>> {
    if !filters::update_filter(&state.pool, &id, &body).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Filter updated successfully")))
}

/// `PUT /api/admin/product-filters/{id}/toggle`
pub async fn toggle_filter_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !filters::set_filter_active(&state.pool, &id, body.active).await? {
        return Err(not_found());
    }
    let verb = if body.active { "activated" } else { "deactivated" };
    Ok(Json(MessageResponse::new(format!("Filter {verb} successfully"))))
}

/// `DELETE /api/admin/product-filters/{id}`
pub async fn delete_filter_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !filters::delete_filter(&state.pool, &id).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Filter deleted successfully")))
}
