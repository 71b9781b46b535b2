//! Pairwise compatibility rules.
//!
//! Each rule names the two categories it needs and runs only when both
//! resolved. Rules run in table order and each adds at most one issue.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::catalog::{Category, SpecValue, Specifications};
use crate::models::configurator::CompatibilityReport;

pub const CPU_SOCKET_ISSUE: &str = "CPU socket incompatible with motherboard";
pub const RAM_TYPE_ISSUE: &str = "RAM type not supported by motherboard";
pub const PSU_POWER_ISSUE: &str = "PSU insufficient for GPU power requirements";

struct Rule {
    first: Category,
    second: Category,
    passes: fn(&Specifications, &Specifications) -> bool,
    issue: &'static str,
}

const RULES: [Rule; 3] = [
    Rule {
        first: Category::Cpu,
        second: Category::Motherboard,
        passes: sockets_match,
        issue: CPU_SOCKET_ISSUE,
    },
    Rule {
        first: Category::Ram,
        second: Category::Motherboard,
        passes: memory_supported,
        issue: RAM_TYPE_ISSUE,
    },
    Rule {
        first: Category::Gpu,
        second: Category::Psu,
        passes: power_sufficient,
        issue: PSU_POWER_ISSUE,
    },
];

/// Evaluate every applicable rule over resolved specifications.
pub fn validate(resolved: &BTreeMap<Category, Specifications>) -> CompatibilityReport {
    let issues: Vec<String> = RULES
        .iter()
        .filter_map(|rule| {
            let first = resolved.get(&rule.first)?;
            let second = resolved.get(&rule.second)?;
            (!(rule.passes)(first, second)).then(|| rule.issue.to_string())
        })
        .collect();

    CompatibilityReport {
        compatible: issues.is_empty(),
        issues,
    }
}

fn present<'a>(specs: &'a Specifications, key: &str) -> Option<&'a SpecValue> {
    specs.get(key).filter(|v| !v.is_null())
}

/// CPU and motherboard declare the same, non-null socket.
fn sockets_match(cpu: &Specifications, motherboard: &Specifications) -> bool {
    match (present(cpu, "socket"), present(motherboard, "socket")) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// RAM type appears in the motherboard's `supported_memory` list.
fn memory_supported(ram: &Specifications, motherboard: &Specifications) -> bool {
    let Some(ram_type) = present(ram, "type") else {
        return false;
    };
    match present(motherboard, "supported_memory").map(SpecValue::to_json) {
        Some(Value::Array(supported)) => supported.contains(&ram_type.to_json()),
        _ => false,
    }
}

/// GPU draw fits the PSU's wattage. Absent or non-numeric values count as 0.
fn power_sufficient(gpu: &Specifications, psu: &Specifications) -> bool {
    let number = |specs: &Specifications, key: &str| {
        specs.get(key).and_then(SpecValue::as_f64).unwrap_or(0.0)
    };
    number(gpu, "power_requirement") <= number(psu, "wattage")
}
