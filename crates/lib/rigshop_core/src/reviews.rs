//! Product reviews and rating aggregates.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::review::{Review, ReviewStats};
use crate::uuid::new_id;

/// Review errors.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid rating {0}; must be between 1 and 5")]
    InvalidRating(i32),

    #[error("You have already reviewed this product")]
    AlreadyReviewed,

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

const REVIEW_COLUMNS: &str = "id, product_id, user_id, username, rating, comment, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub username: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            product_id: row.product_id,
            user_id: row.user_id,
            username: row.username,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

pub fn validate_rating(rating: i32) -> Result<(), ReviewError> {
    if !(1..=5).contains(&rating) {
        return Err(ReviewError::InvalidRating(rating));
    }
    Ok(())
}

impl ReviewStats {
    /// Aggregate a product's ratings. Every star value appears in the
    /// distribution, with zero counts where nobody chose it.
    pub fn from_ratings(ratings: &[i32]) -> Self {
        let mut rating_distribution: BTreeMap<String, i64> =
            (1..=5).map(|star| (star.to_string(), 0)).collect();
        for rating in ratings {
            if let Some(count) = rating_distribution.get_mut(&rating.to_string()) {
                *count += 1;
            }
        }

        let total_reviews = ratings.len() as i64;
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64
        };

        ReviewStats {
            average_rating,
            total_reviews,
            rating_distribution,
        }
    }
}

/// Record a review. The product must exist and the user may review it once.
pub async fn create_review(
    pool: &PgPool,
    product_id: &str,
    user_id: &str,
    username: &str,
    rating: i32,
    comment: &str,
) -> Result<Review, ReviewError> {
    validate_rating(rating)?;

    let product_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(product_id)
            .fetch_one(pool)
            .await?;
    if !product_exists {
        return Err(ReviewError::NotFound("Product not found".into()));
    }

    let row = sqlx::query_as::<_, ReviewRow>(&format!(
        "INSERT INTO reviews (id, product_id, user_id, username, rating, comment) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING {REVIEW_COLUMNS}"
    ))
    .bind(new_id())
    .bind(product_id)
    .bind(user_id)
    .bind(username)
    .bind(rating)
    .bind(comment)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => ReviewError::AlreadyReviewed,
        other => ReviewError::DbError(other),
    })?;
    Ok(row.into())
}

/// Reviews of a product, newest first.
pub async fn list_reviews(pool: &PgPool, product_id: &str) -> Result<Vec<Review>, ReviewError> {
    let rows = sqlx::query_as::<_, ReviewRow>(&format!(
        "SELECT {REVIEW_COLUMNS} FROM reviews WHERE product_id = $1 \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Review::from).collect())
}

pub async fn review_stats(pool: &PgPool, product_id: &str) -> Result<ReviewStats, ReviewError> {
    let ratings = sqlx::query_scalar::<_, i32>("SELECT rating FROM reviews WHERE product_id = $1")
        .bind(product_id)
        .fetch_all(pool)
        .await?;
    Ok(ReviewStats::from_ratings(&ratings))
}

/// Delete a review written by `user_id`. Someone else's review is
/// reported as missing.
pub async fn delete_review(pool: &PgPool, id: &str, user_id: &str) -> Result<(), ReviewError> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(ReviewError::NotFound(
            "Review not found or not owned by you".into(),
        ));
    }
    Ok(())
}
