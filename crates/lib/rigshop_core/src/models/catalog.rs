//! Catalog domain models.
//!
//! Products, their categories, stock status and the open specification
//! bag shared by the compatibility rules and the dynamic filters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Component slot in a PC build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Cpu,
    Gpu,
    Ram,
    Motherboard,
    Storage,
    Psu,
    Case,
    Cooling,
}

impl Category {
    /// Categories in the order the configurator presents them.
    pub const ALL: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Gpu,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooling,
    ];

    /// Stored text representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Ram => "RAM",
            Category::Motherboard => "MOTHERBOARD",
            Category::Storage => "STORAGE",
            Category::Psu => "PSU",
            Category::Case => "CASE",
            Category::Cooling => "COOLING",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Availability shown on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    ComingSoon,
}

impl StockStatus {
    /// Derive the status from stock on hand. An explicit `ComingSoon`
    /// request wins over the derivation; any other request is ignored.
    pub fn derive(stock_quantity: i32, requested: Option<StockStatus>) -> Self {
        match requested {
            Some(StockStatus::ComingSoon) => StockStatus::ComingSoon,
            _ if stock_quantity > 0 => StockStatus::InStock,
            _ => StockStatus::OutOfStock,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::ComingSoon => "coming_soon",
        }
    }

    /// Parse the stored text form; unknown text falls back to out of stock.
    pub fn from_db(s: &str) -> Self {
        match s {
            "in_stock" => StockStatus::InStock,
            "coming_soon" => StockStatus::ComingSoon,
            _ => StockStatus::OutOfStock,
        }
    }
}

/// One value in a product's specification bag.
///
/// Variant order matters for untagged deserialization: booleans and
/// numbers are tried before strings, lists of strings before arbitrary JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Other(Value),
}

impl SpecValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SpecValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SpecValue::Other(Value::Null))
    }

    /// JSON form, used when matching against filter criteria.
    pub fn to_json(&self) -> Value {
        match self {
            SpecValue::Bool(b) => Value::Bool(*b),
            SpecValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SpecValue::Text(s) => Value::String(s.clone()),
            SpecValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            SpecValue::Other(v) => v.clone(),
        }
    }
}

/// Open attribute bag (`socket`, `wattage`, `supported_memory`, ...).
pub type Specifications = BTreeMap<String, SpecValue>;

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub price: f64,
    pub description: String,
    pub image_base64: String,
    pub stock_quantity: i32,
    pub stock_status: StockStatus,
    pub specifications: Specifications,
    pub compatibility_requirements: BTreeMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Admin-supplied product fields for create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_base64: String,
    pub stock_quantity: i32,
    #[serde(default)]
    pub stock_status: Option<StockStatus>,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub compatibility_requirements: BTreeMap<String, Value>,
}

impl ProductInput {
    /// Status to persist for this input.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::derive(self.stock_quantity, self.stock_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_round_trips_through_text() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
            assert_eq!(serde_json::to_value(c).unwrap(), json!(c.as_str()));
        }
        assert!("MONITOR".parse::<Category>().is_err());
        assert!("cpu".parse::<Category>().is_err());
    }

    #[test]
    fn stock_status_derivation() {
        assert_eq!(StockStatus::derive(3, None), StockStatus::InStock);
        assert_eq!(StockStatus::derive(0, None), StockStatus::OutOfStock);
        assert_eq!(
            StockStatus::derive(0, Some(StockStatus::InStock)),
            StockStatus::OutOfStock
        );
        assert_eq!(
            StockStatus::derive(12, Some(StockStatus::ComingSoon)),
            StockStatus::ComingSoon
        );
    }

    #[test]
    fn spec_values_deserialize_to_tagged_variants() {
        let specs: Specifications = serde_json::from_value(json!({
            "socket": "AM4",
            "cores": 12,
            "overclockable": true,
            "supported_memory": ["DDR4", "DDR5"],
            "dimensions": {"height": 44},
            "tdp": null
        }))
        .unwrap();

        assert_eq!(specs["socket"], SpecValue::Text("AM4".into()));
        assert_eq!(specs["cores"].as_f64(), Some(12.0));
        assert_eq!(specs["overclockable"], SpecValue::Bool(true));
        assert_eq!(
            specs["supported_memory"].as_list(),
            Some(&["DDR4".to_string(), "DDR5".to_string()][..])
        );
        assert_eq!(specs["dimensions"], SpecValue::Other(json!({"height": 44})));
        assert!(specs["tdp"].is_null());
    }

    #[test]
    fn product_input_defaults_optional_fields() {
        let input: ProductInput = serde_json::from_value(json!({
            "name": "Test",
            "category": "GPU",
            "brand": "NVIDIA",
            "price": 1299.99,
            "stock_quantity": 0,
            "stock_status": "coming_soon"
        }))
        .unwrap();
        assert!(input.specifications.is_empty());
        assert_eq!(input.description, "");
        assert_eq!(input.stock_status(), StockStatus::ComingSoon);
    }
}
