//! Shopping cart and promotion models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cart line. `price` is the unit price captured when the line was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i32,
    pub price: f64,
}

/// Per-user cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub promo_code: Option<String>,
    pub discount: f64,
    pub created_at: DateTime<Utc>,
}

/// Percentage discount code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: String,
    pub code: String,
    pub discount_percentage: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
