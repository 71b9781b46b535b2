//! Admin-defined product filter definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a filter's request value is interpreted.
///
/// Stored as text. Text that names no known kind is kept as `Unknown` so
/// the definition survives a round-trip but contributes nothing to queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterKind {
    Select,
    Range,
    Boolean,
    Unknown(String),
}

impl FilterKind {
    pub fn as_str(&self) -> &str {
        match self {
            FilterKind::Select => "select",
            FilterKind::Range => "range",
            FilterKind::Boolean => "boolean",
            FilterKind::Unknown(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FilterKind::Unknown(_))
    }
}

impl From<String> for FilterKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "select" => FilterKind::Select,
            "range" => FilterKind::Range,
            "boolean" => FilterKind::Boolean,
            _ => FilterKind::Unknown(s),
        }
    }
}

impl From<FilterKind> for String {
    fn from(kind: FilterKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Filter definition row from `product_filters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub id: String,
    /// Display label, also the source of the request parameter key.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// Dotted product path, e.g. `price` or `specifications.color`.
    pub field: String,
    /// Allowed values, meaningful for `select` filters.
    pub values: Vec<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl FilterDefinition {
    /// Request parameter that carries this filter's value:
    /// `filter_` + lower-cased name with spaces turned into underscores.
    pub fn param_key(&self) -> String {
        format!("filter_{}", self.name.to_lowercase().replace(' ', "_"))
    }
}

/// Admin-supplied fields for creating or replacing a filter definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub field: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str) -> FilterDefinition {
        FilterDefinition {
            id: "f1".into(),
            name: name.into(),
            kind: FilterKind::Select,
            field: "brand".into(),
            values: vec![],
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn param_key_lowercases_and_underscores() {
        assert_eq!(definition("Prix").param_key(), "filter_prix");
        assert_eq!(definition("En Stock").param_key(), "filter_en_stock");
        assert_eq!(
            definition("Marque Mise à Jour").param_key(),
            "filter_marque_mise_à_jour"
        );
    }

    #[test]
    fn unknown_kind_survives_round_trip() {
        let kind: FilterKind = serde_json::from_str("\"slider\"").unwrap();
        assert_eq!(kind, FilterKind::Unknown("slider".into()));
        assert!(!kind.is_known());
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"slider\"");

        let kind: FilterKind = serde_json::from_str("\"range\"").unwrap();
        assert_eq!(kind, FilterKind::Range);
    }
}
