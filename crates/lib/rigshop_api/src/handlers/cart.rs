//! Shopping cart handlers.

use axum::Json;
use axum::extract::{Path, State};
use rigshop_core::cart::queries;
use rigshop_core::models::cart::Cart;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    AddToCartRequest, ApplyPromoRequest, ApplyPromoResponse, MessageResponse,
    UpdateQuantityRequest,
};
use crate::services::cart;

/// `GET /api/cart` — the caller's cart, created empty on first access.
pub async fn get_cart_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<Cart>> {
    Ok(Json(queries::get_or_create_cart(&state.pool, &user.0.sub).await?))
}

/// `POST /api/cart/add`
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Json(body): Json<AddToCartRequest>,
) -> AppResult<Json<MessageResponse>> {
    cart::add(&state.pool, &user.0.sub, &body.product_id, body.quantity).await?;
    Ok(Json(MessageResponse::new("Item added to cart")))
}

/// `PUT /api/cart/update/{product_id}`
pub async fn update_cart_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateQuantityRequest>,
) -> AppResult<Json<MessageResponse>> {
    cart::update_quantity(&state.pool, &user.0.sub, &product_id, body.quantity).await?;
    Ok(Json(MessageResponse::new("Cart updated")))
}

/// `DELETE /api/cart/remove/{product_id}`
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    cart::remove(&state.pool, &user.0.sub, &product_id).await?;
    Ok(Json(MessageResponse::new("Item removed from cart")))
}

/// `POST /api/cart/apply-promo`
pub async fn apply_promo_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Json(body): Json<ApplyPromoRequest>,
) -> AppResult<Json<ApplyPromoResponse>> {
    let cart = cart::apply_promo(&state.pool, &user.0.sub, &body.code).await?;
    Ok(Json(ApplyPromoResponse {
        message: "Promo code applied".into(),
        discount: cart.discount,
    }))
}
