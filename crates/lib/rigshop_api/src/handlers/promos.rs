//! Promo code administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use rigshop_core::cart::promo;
use rigshop_core::models::cart::PromoCode;
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{MessageResponse, PromoCodeRequest, ToggleRequest};

fn not_found() -> AppError {
    AppError::NotFound("Promo code not found".into())
}

/// `GET /api/admin/promo-codes`
pub async fn list_promo_codes_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PromoCode>>> {
    Ok(Json(promo::list_promo_codes(&state.pool).await?))
}

/// `POST /api/admin/promo-codes`
pub async fn create_promo_code_handler(
    State(state): State<AppState>,
    Json(body): Json<PromoCodeRequest>,
) -> AppResult<Json<PromoCode>> {
    let created = promo::create_promo_code(&state.pool, &body.code, body.discount_percentage).await?;
    info!(code = %created.code, pct = created.discount_percentage, "created promo code");
    Ok(Json(created))
}

/// `PUT /api/admin/promo-codes/{id}`
pub async fn update_promo_code_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PromoCodeRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !promo::update_promo_code(&state.pool, &id, &body.code, body.discount_percentage).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Promo code updated successfully")))
}

/// `PUT /api/admin/promo-codes/{id}/toggle`
pub async fn toggle_promo_code_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ToggleRequest>,
) -> AppResult<Json<MessageResponse>> {
    if !promo::set_promo_active(&state.pool, &id, body.active).await? {
        return Err(not_found());
    }
    let verb = if body.active { "activated" } else { "deactivated" };
    Ok(Json(MessageResponse::new(format!(
        "Promo code {verb} successfully"
    ))))
}

/// `DELETE /api/admin/promo-codes/{id}`
pub async fn delete_promo_code_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !promo::delete_promo_code(&state.pool, &id).await? {
        return Err(not_found());
    }
    Ok(Json(MessageResponse::new("Promo code deleted successfully")))
}
