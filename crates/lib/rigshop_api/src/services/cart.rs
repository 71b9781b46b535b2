//! Cart service — lock, edit, recalculate and save in one transaction so
//! every mutation refreshes totals and the promo discount the same way.

use rigshop_core::cart::{self, CartError, promo, queries};
use rigshop_core::catalog;
use rigshop_core::models::cart::Cart;
use rigshop_core::models::catalog::Product;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::error::{AppError, AppResult};

async fn product(pool: &PgPool, product_id: &str) -> AppResult<Product> {
    catalog::queries::get_product(pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))
}

/// Lock the user's cart for the rest of `conn`'s transaction.
async fn locked_cart(conn: &mut PgConnection, user_id: &str) -> AppResult<Cart> {
    queries::lock_cart(conn, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".into()))
}

/// Recompute totals against the current state of the applied code, then save.
async fn recalculate_and_save(pool: &PgPool, conn: &mut PgConnection, cart: &mut Cart) -> AppResult<()> {
    let current = match cart.promo_code.as_deref() {
        Some(code) => promo::find_active_promo(pool, code).await?,
        None => None,
    };
    cart::recalculate(cart, current.as_ref());
    queries::save_cart(&mut *conn, cart).await?;
    debug!(user_id = %cart.user_id, total = cart.total, discount = cart.discount, "saved cart");
    Ok(())
}

pub async fn add(pool: &PgPool, user_id: &str, product_id: &str, quantity: i32) -> AppResult<Cart> {
    let product = product(pool, product_id).await?;
    let mut tx = pool.begin().await?;
    queries::ensure_cart(&mut *tx, user_id).await?;
    let mut cart = locked_cart(&mut tx, user_id).await?;
    cart::add_item(&mut cart.items, &product, quantity)?;
    recalculate_and_save(pool, &mut tx, &mut cart).await?;
    tx.commit().await?;
    Ok(cart)
}

pub async fn update_quantity(
    pool: &PgPool,
    user_id: &str,
    product_id: &str,
    quantity: i32,
) -> AppResult<Cart> {
    if quantity <= 0 {
        return Err(CartError::Validation("Quantity must be greater than 0".into()).into());
    }
    let product = product(pool, product_id).await?;
    let mut tx = pool.begin().await?;
    let mut cart = locked_cart(&mut tx, user_id).await?;
    cart::set_quantity(&mut cart.items, &product, quantity)?;
    recalculate_and_save(pool, &mut tx, &mut cart).await?;
    tx.commit().await?;
    Ok(cart)
}

pub async fn remove(pool: &PgPool, user_id: &str, product_id: &str) -> AppResult<Cart> {
    let mut tx = pool.begin().await?;
    let mut cart = locked_cart(&mut tx, user_id).await?;
    cart::remove_item(&mut cart.items, product_id);
    recalculate_and_save(pool, &mut tx, &mut cart).await?;
    tx.commit().await?;
    Ok(cart)
}

pub async fn apply_promo(pool: &PgPool, user_id: &str, code: &str) -> AppResult<Cart> {
    let promo = promo::find_active_promo(pool, code)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid promo code".into()))?;
    let mut tx = pool.begin().await?;
    let mut cart = locked_cart(&mut tx, user_id).await?;
    cart.total = cart::subtotal(&cart.items);
    cart::apply_promo(&mut cart, &promo)?;
    queries::save_cart(&mut *tx, &cart).await?;
    tx.commit().await?;
    Ok(cart)
}
