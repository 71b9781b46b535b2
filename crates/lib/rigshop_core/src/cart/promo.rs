//! Promo code administration and lookup.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::CartError;
use crate::models::cart::PromoCode;
use crate::uuid::new_id;

const PROMO_COLUMNS: &str = "id, code, discount_percentage, active, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PromoRow {
    pub id: String,
    pub code: String,
    pub discount_percentage: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<PromoRow> for PromoCode {
    fn from(row: PromoRow) -> Self {
        PromoCode {
            id: row.id,
            code: row.code,
            discount_percentage: row.discount_percentage,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

/// A code must be non-blank and discount in `(0, 100]` percent.
pub fn validate_promo(code: &str, discount_percentage: f64) -> Result<(), CartError> {
    if code.trim().is_empty() {
        return Err(CartError::Validation("Promo code is required".into()));
    }
    if !(discount_percentage > 0.0 && discount_percentage <= 100.0) {
        return Err(CartError::Validation(
            "Discount percentage must be greater than 0 and at most 100".into(),
        ));
    }
    Ok(())
}

fn conflict_on_duplicate(code: &str) -> impl FnOnce(sqlx::Error) -> CartError + '_ {
    move |e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            CartError::Conflict(format!("Promo code '{code}' already exists"))
        }
        other => CartError::DbError(other),
    }
}

pub async fn list_promo_codes(pool: &PgPool) -> Result<Vec<PromoCode>, CartError> {
    let rows = sqlx::query_as::<_, PromoRow>(&format!(
        "SELECT {PROMO_COLUMNS} FROM promo_codes ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(PromoCode::from).collect())
}

/// Create an active promo code.
pub async fn create_promo_code(
    pool: &PgPool,
    code: &str,
    discount_percentage: f64,
) -> Result<PromoCode, CartError> {
    validate_promo(code, discount_percentage)?;
    let code = code.trim();
    let row = sqlx::query_as::<_, PromoRow>(&format!(
        "INSERT INTO promo_codes (id, code, discount_percentage) VALUES ($1, $2, $3) \
         RETURNING {PROMO_COLUMNS}"
    ))
    .bind(new_id())
    .bind(code)
    .bind(discount_percentage)
    .fetch_one(pool)
    .await
    .map_err(conflict_on_duplicate(code))?;
    Ok(row.into())
}

/// Rename a code and change its percentage. Returns `false` when no code has `id`.
pub async fn update_promo_code(
    pool: &PgPool,
    id: &str,
    code: &str,
    discount_percentage: f64,
) -> Result<bool, CartError> {
    validate_promo(code, discount_percentage)?;
    let code = code.trim();
    let result = sqlx::query(
        "UPDATE promo_codes SET code = $2, discount_percentage = $3 WHERE id = $1",
    )
    .bind(id)
    .bind(code)
    .bind(discount_percentage)
    .execute(pool)
    .await
    .map_err(conflict_on_duplicate(code))?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_promo_active(pool: &PgPool, id: &str, active: bool) -> Result<bool, CartError> {
    let result = sqlx::query("UPDATE promo_codes SET active = $2 WHERE id = $1")
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_promo_code(pool: &PgPool, id: &str) -> Result<bool, CartError> {
    let result = sqlx::query("DELETE FROM promo_codes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Look up an active code by exact text.
pub async fn find_active_promo(pool: &PgPool, code: &str) -> Result<Option<PromoCode>, CartError> {
    let row = sqlx::query_as::<_, PromoRow>(&format!(
        "SELECT {PROMO_COLUMNS} FROM promo_codes WHERE code = $1 AND active"
    ))
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(PromoCode::from))
}
