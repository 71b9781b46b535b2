//! Cart persistence.

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnection, PgExecutor};
use sqlx::PgPool;
use sqlx::types::Json;

use super::CartError;
use crate::models::cart::{Cart, CartItem};
use crate::uuid::new_id;

const CART_COLUMNS: &str = "id, user_id, items, total, promo_code, discount, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CartRow {
    pub id: String,
    pub user_id: String,
    pub items: Json<Vec<CartItem>>,
    pub total: f64,
    pub promo_code: Option<String>,
    pub discount: f64,
    pub created_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Cart {
            id: row.id,
            user_id: row.user_id,
            items: row.items.0,
            total: row.total,
            promo_code: row.promo_code,
            discount: row.discount,
            created_at: row.created_at,
        }
    }
}

/// The user's cart, if one exists.
pub async fn get_cart(pool: &PgPool, user_id: &str) -> Result<Option<Cart>, CartError> {
    let row = sqlx::query_as::<_, CartRow>(&format!(
        "SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Cart::from))
}

/// Create an empty cart for the user unless one exists.
pub async fn ensure_cart<'e, E>(executor: E, user_id: &str) -> Result<(), CartError>
where
    E: PgExecutor<'e>,
{
    sqlx::query("INSERT INTO carts (id, user_id) VALUES ($1, $2) ON CONFLICT (user_id) DO NOTHING")
        .bind(new_id())
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// The user's cart, creating an empty one on first access.
pub async fn get_or_create_cart(pool: &PgPool, user_id: &str) -> Result<Cart, CartError> {
    ensure_cart(pool, user_id).await?;
    get_cart(pool, user_id)
        .await?
        .ok_or_else(|| CartError::NotFound("Cart not found".into()))
}

fn lock_cart_sql() -> String {
    format!("SELECT {CART_COLUMNS} FROM carts WHERE user_id = $1 FOR UPDATE")
}

/// The user's cart, row-locked until the surrounding transaction ends.
pub async fn lock_cart(conn: &mut PgConnection, user_id: &str) -> Result<Option<Cart>, CartError> {
    let row = sqlx::query_as::<_, CartRow>(&lock_cart_sql())
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Cart::from))
}

/// Persist lines, totals and promo state.
pub async fn save_cart<'e, E>(executor: E, cart: &Cart) -> Result<(), CartError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "UPDATE carts SET items = $2, total = $3, promo_code = $4, discount = $5 \
         WHERE user_id = $1",
    )
    .bind(&cart.user_id)
    .bind(Json(&cart.items))
    .bind(cart.total)
    .bind(&cart.promo_code)
    .bind(cart.discount)
    .execute(executor)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_lock_the_cart_row() {
        let sql = lock_cart_sql();
        assert!(sql.contains("WHERE user_id = $1"));
        assert!(sql.ends_with("FOR UPDATE"));
    }
}
