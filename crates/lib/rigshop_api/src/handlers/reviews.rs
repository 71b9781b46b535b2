//! Product review handlers.

use axum::Json;
use axum::extract::{Path, State};
use rigshop_core::models::review::{Review, ReviewStats};
use rigshop_core::reviews;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateReviewRequest, MessageResponse};

/// `POST /api/reviews`
pub async fn create_review_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Json(body): Json<CreateReviewRequest>,
) -> AppResult<Json<Review>> {
    reviews::validate_rating(body.rating)?;
    let review = reviews::create_review(
        &state.pool,
        &body.product_id,
        &user.0.sub,
        &user.0.username,
        body.rating,
        &body.comment,
    )
    .await?;
    Ok(Json(review))
}

/// `GET /api/reviews/{id}` — reviews of product `id`, newest first.
pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(reviews::list_reviews(&state.pool, &product_id).await?))
}

/// `GET /api/reviews/{id}/stats`
pub async fn review_stats_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ReviewStats>> {
    Ok(Json(reviews::review_stats(&state.pool, &product_id).await?))
}

/// `DELETE /api/reviews/{id}` — authors may delete their own review.
pub async fn delete_review_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    reviews::delete_review(&state.pool, &id, &user.0.sub).await?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
