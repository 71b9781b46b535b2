//! PC configurator models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::Category;

/// Selected product id per component slot. At most one per category.
pub type ComponentSelection = BTreeMap<Category, String>;

/// Verdict of the compatibility rules over a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub compatible: bool,
    /// Issue descriptions in rule evaluation order.
    pub issues: Vec<String>,
}

/// Compatibility verdict plus the summed price of the resolved products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationCheck {
    pub compatible: bool,
    pub issues: Vec<String>,
    pub total_price: f64,
}

/// Saved build. Price and compatibility are computed once, at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcConfiguration {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub components: ComponentSelection,
    pub total_price: f64,
    pub compatibility_status: bool,
    pub compatibility_issues: Vec<String>,
    pub created_at: DateTime<Utc>,
}
