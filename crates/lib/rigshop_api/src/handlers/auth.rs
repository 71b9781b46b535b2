//! Authentication request handlers.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{AdminLoginRequest, LoginRequest, RegisterRequest, TokenResponse};
use crate::services::auth;

/// `POST /api/register` — create a customer account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::register(
        &state.pool,
        &body.email,
        &body.username,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /api/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /api/admin/login` — authenticate with the store admin password.
pub async fn admin_login_handler(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth::admin_login(
        &state.pool,
        &body.password,
        state.config.admin_password.as_deref(),
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok(Json(resp))
}
