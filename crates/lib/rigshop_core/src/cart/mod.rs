//! Shopping cart — line edits, totals and promo discounts.
//!
//! The functions here are pure; callers load the cart, apply an edit, call
//! [`recalculate`] with the freshly looked-up promo code and save.

pub mod promo;
pub mod queries;

use thiserror::Error;

use crate::models::cart::{Cart, CartItem, PromoCode};
use crate::models::catalog::Product;

/// Cart and promo code errors.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient stock")]
    InsufficientStock,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

fn require_positive(quantity: i32) -> Result<(), CartError> {
    if quantity <= 0 {
        return Err(CartError::Validation(
            "Quantity must be greater than 0".into(),
        ));
    }
    Ok(())
}

fn require_stock(product: &Product, line_quantity: i32) -> Result<(), CartError> {
    if product.stock_quantity < line_quantity {
        return Err(CartError::InsufficientStock);
    }
    Ok(())
}

/// Add `quantity` of `product`, merging into an existing line.
///
/// Stock is checked against the resulting line quantity. A new line
/// captures the product's current price; a merged line keeps its own.
pub fn add_item(items: &mut Vec<CartItem>, product: &Product, quantity: i32) -> Result<(), CartError> {
    require_positive(quantity)?;

    match items.iter_mut().find(|i| i.product_id == product.id) {
        Some(line) => {
            let merged = line.quantity.saturating_add(quantity);
            require_stock(product, merged)?;
            line.quantity = merged;
        }
        None => {
            require_stock(product, quantity)?;
            items.push(CartItem {
                product_id: product.id.clone(),
                quantity,
                price: product.price,
            });
        }
    }
    Ok(())
}

/// Replace the quantity of the line holding `product`.
pub fn set_quantity(items: &mut [CartItem], product: &Product, quantity: i32) -> Result<(), CartError> {
    require_positive(quantity)?;
    require_stock(product, quantity)?;

    let line = items
        .iter_mut()
        .find(|i| i.product_id == product.id)
        .ok_or_else(|| CartError::NotFound("Item not found in cart".into()))?;
    line.quantity = quantity;
    Ok(())
}

/// Drop the line for `product_id`. Returns whether a line was removed.
pub fn remove_item(items: &mut Vec<CartItem>, product_id: &str) -> bool {
    let before = items.len();
    items.retain(|i| i.product_id != product_id);
    items.len() != before
}

/// Sum of `quantity × price` over all lines.
pub fn subtotal(items: &[CartItem]) -> f64 {
    items.iter().map(|i| f64::from(i.quantity) * i.price).sum()
}

/// Discount granted by `promo` on `total`.
pub fn discount_for(total: f64, promo: &PromoCode) -> f64 {
    total * promo.discount_percentage / 100.0
}

/// Recompute the total and revalidate the applied promo code.
///
/// `promo` is the current state of the cart's code, if it still exists.
/// An inactive or vanished code is cleared along with its discount.
pub fn recalculate(cart: &mut Cart, promo: Option<&PromoCode>) {
    cart.total = subtotal(&cart.items);

    let Some(code) = cart.promo_code.as_deref() else {
        cart.discount = 0.0;
        return;
    };
    match promo.filter(|p| p.active && p.code == code) {
        Some(promo) => cart.discount = discount_for(cart.total, promo),
        None => {
            cart.promo_code = None;
            cart.discount = 0.0;
        }
    }
}

/// Apply an active `promo` to the cart.
pub fn apply_promo(cart: &mut Cart, promo: &PromoCode) -> Result<(), CartError> {
    if !promo.active {
        return Err(CartError::NotFound("Invalid promo code".into()));
    }
    cart.promo_code = Some(promo.code.clone());
    cart.discount = discount_for(cart.total, promo);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{Category, StockStatus};
    use chrono::Utc;

    fn product(id: &str, price: f64, stock_quantity: i32) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            category: Category::Gpu,
            brand: "MSI".into(),
            price,
            description: String::new(),
            image_base64: String::new(),
            stock_quantity,
            stock_status: StockStatus::derive(stock_quantity, None),
            specifications: Default::default(),
            compatibility_requirements: Default::default(),
            created_at: Utc::now(),
        }
    }

    fn cart(items: Vec<CartItem>) -> Cart {
        Cart {
            id: "cart-1".into(),
            user_id: "user-1".into(),
            items,
            total: 0.0,
            promo_code: None,
            discount: 0.0,
            created_at: Utc::now(),
        }
    }

    fn promo(code: &str, pct: f64, active: bool) -> PromoCode {
        PromoCode {
            id: format!("promo-{code}"),
            code: code.into(),
            discount_percentage: pct,
            active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn add_merges_existing_line_and_keeps_its_price() {
        let mut items = Vec::new();
        add_item(&mut items, &product("gpu", 500.0, 10), 2).unwrap();
        add_item(&mut items, &product("gpu", 450.0, 10), 3).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        assert_eq!(items[0].price, 500.0);
    }

    #[test]
    fn add_checks_stock_against_resulting_quantity() {
        let gpu = product("gpu", 500.0, 4);
        let mut items = Vec::new();
        add_item(&mut items, &gpu, 3).unwrap();
        assert!(matches!(
            add_item(&mut items, &gpu, 2),
            Err(CartError::InsufficientStock)
        ));
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn add_rejects_non_positive_quantity() {
        let mut items = Vec::new();
        assert!(matches!(
            add_item(&mut items, &product("gpu", 500.0, 4), 0),
            Err(CartError::Validation(_))
        ));
        assert!(items.is_empty());
    }

    #[test]
    fn set_quantity_requires_existing_line() {
        let gpu = product("gpu", 500.0, 10);
        let mut items: Vec<CartItem> = Vec::new();
        assert!(matches!(
            set_quantity(&mut items, &gpu, 1),
            Err(CartError::NotFound(_))
        ));

        add_item(&mut items, &gpu, 1).unwrap();
        set_quantity(&mut items, &gpu, 7).unwrap();
        assert_eq!(items[0].quantity, 7);
        assert!(set_quantity(&mut items, &gpu, 11).is_err());
        assert!(set_quantity(&mut items, &gpu, -1).is_err());
    }

    #[test]
    fn remove_reports_whether_line_existed() {
        let mut items = Vec::new();
        add_item(&mut items, &product("gpu", 500.0, 10), 1).unwrap();
        assert!(!remove_item(&mut items, "cpu"));
        assert!(remove_item(&mut items, "gpu"));
        assert!(items.is_empty());
    }

    #[test]
    fn recalculate_refreshes_discount_for_active_code() {
        let mut cart = cart(vec![
            CartItem {
                product_id: "a".into(),
                quantity: 2,
                price: 100.0,
            },
            CartItem {
                product_id: "b".into(),
                quantity: 1,
                price: 50.0,
            },
        ]);
        let gaming10 = promo("GAMING10", 10.0, true);
        recalculate(&mut cart, None);
        apply_promo(&mut cart, &gaming10).unwrap();
        assert_eq!(cart.total, 250.0);
        assert_eq!(cart.discount, 25.0);

        cart.items[0].quantity = 1;
        recalculate(&mut cart, Some(&gaming10));
        assert_eq!(cart.total, 150.0);
        assert_eq!(cart.discount, 15.0);
        assert_eq!(cart.promo_code.as_deref(), Some("GAMING10"));
    }

    #[test]
    fn recalculate_clears_deactivated_or_missing_code() {
        let mut cart = cart(vec![CartItem {
            product_id: "a".into(),
            quantity: 1,
            price: 80.0,
        }]);
        cart.promo_code = Some("GAMING10".into());
        cart.discount = 8.0;

        recalculate(&mut cart, Some(&promo("GAMING10", 10.0, false)));
        assert_eq!(cart.promo_code, None);
        assert_eq!(cart.discount, 0.0);

        cart.promo_code = Some("GONE".into());
        recalculate(&mut cart, None);
        assert_eq!(cart.promo_code, None);
        assert_eq!(cart.total, 80.0);
    }

    #[test]
    fn inactive_code_cannot_be_applied() {
        let mut cart = cart(vec![]);
        assert!(apply_promo(&mut cart, &promo("OLD", 5.0, false)).is_err());
        assert_eq!(cart.promo_code, None);
    }
}
