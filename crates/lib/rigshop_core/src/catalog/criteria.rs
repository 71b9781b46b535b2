//! Product query criteria.
//!
//! A [`Criteria`] is a conjunction of per-field constraints plus an
//! optional name search. It is produced by the filter compiler and consumed
//! either by [`Criteria::matches`] (in memory) or by the SQL renderer in
//! `catalog::queries`. Both follow the same document-store semantics:
//!
//! * equality on a list value matches when any element is equal;
//! * text never equals a number or a boolean and vice versa;
//! * range bounds only match numeric values;
//! * a path that names no product attribute matches nothing.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::models::catalog::Product;

/// Literal compared against a product attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Scalar {
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Text(s) => Value::String(s.clone()),
            Scalar::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Bool(b) => Value::Bool(*b),
        }
    }

    fn equals(&self, value: &Value) -> bool {
        match (self, value) {
            (Scalar::Text(s), Value::String(v)) => s == v,
            (Scalar::Number(n), Value::Number(v)) => v.as_f64() == Some(*n),
            (Scalar::Bool(b), Value::Bool(v)) => b == v,
            (_, Value::Array(items)) => items.iter().any(|item| self.equals(item)),
            _ => false,
        }
    }
}

/// Constraint on one field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Equals(Scalar),
    /// Inclusive bounds. At least one bound is always present.
    Range { min: Option<f64>, max: Option<f64> },
}

impl Constraint {
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            Constraint::Equals(scalar) => scalar.equals(value),
            Constraint::Range { min, max } => match value.as_f64() {
                Some(v) => min.is_none_or(|m| v >= m) && max.is_none_or(|m| v <= m),
                None => false,
            },
        }
    }
}

/// Top-level product columns addressable by filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Category,
    Brand,
    Description,
    StockStatus,
    Price,
    StockQuantity,
}

impl Column {
    pub fn sql_name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Category => "category",
            Column::Brand => "brand",
            Column::Description => "description",
            Column::StockStatus => "stock_status",
            Column::Price => "price",
            Column::StockQuantity => "stock_quantity",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Price | Column::StockQuantity)
    }
}

/// JSON document columns whose nested keys are addressable by dotted paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentColumn {
    Specifications,
    CompatibilityRequirements,
}

impl DocumentColumn {
    pub fn sql_name(&self) -> &'static str {
        match self {
            DocumentColumn::Specifications => "specifications",
            DocumentColumn::CompatibilityRequirements => "compatibility_requirements",
        }
    }
}

/// Resolved form of a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Column(Column),
    Document {
        column: DocumentColumn,
        keys: Vec<String>,
    },
    Unknown,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let document = match head {
            "specifications" => Some(DocumentColumn::Specifications),
            "compatibility_requirements" => Some(DocumentColumn::CompatibilityRequirements),
            _ => None,
        };
        if let Some(column) = document {
            return match rest {
                Some(rest) if !rest.is_empty() => FieldPath::Document {
                    column,
                    keys: rest.split('.').map(str::to_string).collect(),
                },
                _ => FieldPath::Unknown,
            };
        }
        if rest.is_some() {
            return FieldPath::Unknown;
        }
        let column = match head {
            "id" => Column::Id,
            "name" => Column::Name,
            "category" => Column::Category,
            "brand" => Column::Brand,
            "description" => Column::Description,
            "stock_status" => Column::StockStatus,
            "price" => Column::Price,
            "stock_quantity" => Column::StockQuantity,
            _ => return FieldPath::Unknown,
        };
        FieldPath::Column(column)
    }

    /// Value of this path on `product`, if present.
    pub fn resolve(&self, product: &Product) -> Option<Value> {
        match self {
            FieldPath::Column(column) => Some(match column {
                Column::Id => Value::from(product.id.as_str()),
                Column::Name => Value::from(product.name.as_str()),
                Column::Category => Value::from(product.category.as_str()),
                Column::Brand => Value::from(product.brand.as_str()),
                Column::Description => Value::from(product.description.as_str()),
                Column::StockStatus => Value::from(product.stock_status.as_str()),
                Column::Price => Value::from(product.price),
                Column::StockQuantity => Value::from(product.stock_quantity),
            }),
            FieldPath::Document { column, keys } => {
                let (first, nested) = keys.split_first()?;
                let mut value = match column {
                    DocumentColumn::Specifications => {
                        product.specifications.get(first)?.to_json()
                    }
                    DocumentColumn::CompatibilityRequirements => {
                        product.compatibility_requirements.get(first)?.clone()
                    }
                };
                for key in nested {
                    value = value.get(key)?.clone();
                }
                Some(value).filter(|v| !v.is_null())
            }
            FieldPath::Unknown => None,
        }
    }
}

/// Compiled product predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Criteria {
    /// Case-insensitive substring matched against `name` only.
    pub search: Option<String>,
    /// Field path → constraint. Inserting an existing path replaces it.
    pub fields: BTreeMap<String, Constraint>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constraint for `field`, replacing any earlier one.
    pub fn set(&mut self, field: impl Into<String>, constraint: Constraint) {
        self.fields.insert(field.into(), constraint);
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.fields.is_empty()
    }

    /// Evaluate against an in-memory product.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(search) = &self.search
            && !product.name.to_lowercase().contains(&search.to_lowercase())
        {
            return false;
        }
        self.fields.iter().all(|(path, constraint)| {
            constraint.matches(FieldPath::parse(path).resolve(product).as_ref())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{Category, SpecValue, StockStatus};
    use chrono::Utc;
    use serde_json::json;

    fn product(name: &str, brand: &str, price: f64) -> Product {
        Product {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.into(),
            category: Category::Gpu,
            brand: brand.into(),
            price,
            description: String::new(),
            image_base64: String::new(),
            stock_quantity: 4,
            stock_status: StockStatus::InStock,
            specifications: [
                ("color".to_string(), SpecValue::Text("black".into())),
                ("power_requirement".to_string(), SpecValue::Number(320.0)),
                (
                    "supported_memory".to_string(),
                    SpecValue::List(vec!["DDR4".into(), "DDR5".into()]),
                ),
                ("dimensions".to_string(), SpecValue::Other(json!({"length": 304}))),
            ]
            .into_iter()
            .collect(),
            compatibility_requirements: Default::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn parses_field_paths() {
        assert_eq!(FieldPath::parse("price"), FieldPath::Column(Column::Price));
        assert_eq!(
            FieldPath::parse("specifications.dimensions.length"),
            FieldPath::Document {
                column: DocumentColumn::Specifications,
                keys: vec!["dimensions".into(), "length".into()],
            }
        );
        assert_eq!(FieldPath::parse("specifications"), FieldPath::Unknown);
        assert_eq!(FieldPath::parse("price.amount"), FieldPath::Unknown);
        assert_eq!(FieldPath::parse("weight"), FieldPath::Unknown);
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let p = product("GeForce RTX 4080", "NVIDIA", 1199.0);
        let criteria = Criteria {
            search: Some("rtx".into()),
            ..Default::default()
        };
        assert!(criteria.matches(&p));

        let criteria = Criteria {
            search: Some("nvidia".into()),
            ..Default::default()
        };
        assert!(!criteria.matches(&p), "brand must not be searched");
    }

    #[test]
    fn equality_respects_value_types() {
        let p = product("RTX 4080", "NVIDIA", 1199.0);
        let text = Constraint::Equals(Scalar::Text("1199".into()));
        let number = Constraint::Equals(Scalar::Number(1199.0));
        let price = FieldPath::parse("price").resolve(&p);
        assert!(!text.matches(price.as_ref()));
        assert!(number.matches(price.as_ref()));
    }

    #[test]
    fn equality_on_list_matches_any_element() {
        let p = product("RTX 4080", "NVIDIA", 1199.0);
        let mut criteria = Criteria::new();
        criteria.set(
            "specifications.supported_memory",
            Constraint::Equals(Scalar::Text("DDR5".into())),
        );
        assert!(criteria.matches(&p));
    }

    #[test]
    fn range_requires_numeric_value() {
        let p = product("RTX 4080", "NVIDIA", 1199.0);
        let range = Constraint::Range {
            min: Some(300.0),
            max: None,
        };
        let power = FieldPath::parse("specifications.power_requirement").resolve(&p);
        let color = FieldPath::parse("specifications.color").resolve(&p);
        assert!(range.matches(power.as_ref()));
        assert!(!range.matches(color.as_ref()));
        assert!(!range.matches(None));
    }

    #[test]
    fn nested_document_paths_resolve() {
        let p = product("RTX 4080", "NVIDIA", 1199.0);
        let mut criteria = Criteria::new();
        criteria.set(
            "specifications.dimensions.length",
            Constraint::Range {
                min: None,
                max: Some(310.0),
            },
        );
        assert!(criteria.matches(&p));
    }

    #[test]
    fn unknown_path_matches_nothing() {
        let p = product("RTX 4080", "NVIDIA", 1199.0);
        let mut criteria = Criteria::new();
        criteria.set("weight", Constraint::Equals(Scalar::Number(1.0)));
        assert!(!criteria.matches(&p));
    }
}
