//! Dynamic filter compilation.
//!
//! Turns the storefront's query string into [`Criteria`]: fixed category
//! and search parameters seed the criteria, then each active filter
//! definition looks up its own `filter_*` parameter and contributes a
//! constraint on its field. Malformed values contribute nothing; nothing
//! here returns an error.

use std::collections::HashMap;

use tracing::debug;

use super::criteria::{Constraint, Criteria, Scalar};
use crate::models::filter::{FilterDefinition, FilterKind};

/// Fixed listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseQuery {
    /// Exact match on the product category.
    pub category: Option<String>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
}

impl BaseQuery {
    /// Criteria seeded from the fixed parameters alone.
    pub fn seed(&self) -> Criteria {
        let mut criteria = Criteria::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            criteria.set("category", Constraint::Equals(Scalar::Text(category.into())));
        }
        criteria.search = self.search.clone().filter(|s| !s.is_empty());
        criteria
    }
}

/// Compile `base` plus the active `filters` against raw request `params`.
///
/// Filters apply in the given order; a later filter on the same field path
/// replaces the earlier constraint, the seeded category included.
pub fn compile(
    base: &BaseQuery,
    filters: &[FilterDefinition],
    params: &HashMap<String, String>,
) -> Criteria {
    let mut criteria = base.seed();

    for filter in filters.iter().filter(|f| f.active) {
        let Some(raw) = params.get(&filter.param_key()) else {
            continue;
        };
        match constraint_for(&filter.kind, raw) {
            Some(constraint) => {
                debug!(filter = %filter.name, field = %filter.field, "applying dynamic filter");
                criteria.set(filter.field.clone(), constraint);
            }
            None => {
                debug!(filter = %filter.name, value = %raw, "dropping unusable filter value");
            }
        }
    }

    criteria
}

/// Constraint contributed by one filter value, if any.
fn constraint_for(kind: &FilterKind, raw: &str) -> Option<Constraint> {
    match kind {
        FilterKind::Select if !raw.is_empty() => {
            Some(Constraint::Equals(Scalar::Text(raw.to_string())))
        }
        FilterKind::Select => None,
        FilterKind::Range => parse_range(raw),
        FilterKind::Boolean => parse_bool(raw).map(|b| Constraint::Equals(Scalar::Bool(b))),
        FilterKind::Unknown(_) => None,
    }
}

/// `"min:max"` with either side optional, or a single exact number.
/// Each unparseable bound is dropped on its own.
fn parse_range(raw: &str) -> Option<Constraint> {
    if raw.is_empty() {
        return None;
    }
    match raw.split_once(':') {
        Some((min, max)) => {
            let min = parse_number(min);
            let max = parse_number(max);
            if min.is_none() && max.is_none() {
                None
            } else {
                Some(Constraint::Range { min, max })
            }
        }
        None => parse_number(raw).map(|n| Constraint::Equals(Scalar::Number(n))),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
