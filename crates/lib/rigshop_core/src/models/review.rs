//! Product review models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub username: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate rating for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Exact mean of all ratings, 0 when there are none.
    pub average_rating: f64,
    pub total_reviews: i64,
    /// Count per star value, keyed `"1"` through `"5"`.
    pub rating_distribution: BTreeMap<String, i64>,
}
