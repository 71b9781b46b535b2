//! PC configurator — compatibility checks and saved builds.

pub mod queries;
pub mod rules;

use std::collections::BTreeMap;

use futures::future::join_all;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{CatalogError, ProductLookup};
use crate::models::catalog::{Category, Product, Specifications};
use crate::models::configurator::{ComponentSelection, ConfigurationCheck};

pub use rules::validate;

/// Configurator errors.
#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Look up every selected product concurrently.
///
/// Selections whose id is not in the catalog are left out of the result.
pub async fn resolve_components<L>(
    lookup: &L,
    components: &ComponentSelection,
) -> Result<BTreeMap<Category, Product>, CatalogError>
where
    L: ProductLookup + ?Sized,
{
    let lookups = components.iter().map(|(category, id)| async move {
        (*category, id.as_str(), lookup.find_product(id).await)
    });

    let mut resolved = BTreeMap::new();
    for (category, id, found) in join_all(lookups).await {
        match found? {
            Some(product) => {
                resolved.insert(category, product);
            }
            None => debug!(%category, product_id = %id, "selected product not found"),
        }
    }
    Ok(resolved)
}

/// Validate a selection and price it in one pass over the catalog.
///
/// Only found products take part: a rule whose categories are not both
/// resolved is skipped, and missing products add nothing to the total.
pub async fn check_configuration<L>(
    lookup: &L,
    components: &ComponentSelection,
) -> Result<ConfigurationCheck, CatalogError>
where
    L: ProductLookup + ?Sized,
{
    let resolved = resolve_components(lookup, components).await?;

    let specs: BTreeMap<Category, Specifications> = resolved
        .iter()
        .map(|(category, product)| (*category, product.specifications.clone()))
        .collect();

    let report = validate(&specs);
    let total_price = resolved.values().map(|p| p.price).sum();

    debug!(
        components = components.len(),
        compatible = report.compatible,
        total_price,
        "checked configuration"
    );

    Ok(ConfigurationCheck {
        compatible: report.compatible,
        issues: report.issues,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{SpecValue, StockStatus};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;

    struct InMemoryCatalog(HashMap<String, Product>);

    #[async_trait]
    impl ProductLookup for InMemoryCatalog {
        async fn find_product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
            Ok(self.0.get(id).cloned())
        }
    }

    struct BrokenCatalog;

    #[async_trait]
    impl ProductLookup for BrokenCatalog {
        async fn find_product(&self, _id: &str) -> Result<Option<Product>, CatalogError> {
            Err(CatalogError::DbError(sqlx::Error::PoolTimedOut))
        }
    }

    fn product(id: &str, category: Category, price: f64, specs: &[(&str, SpecValue)]) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            category,
            brand: "Generic".into(),
            price,
            description: String::new(),
            image_base64: String::new(),
            stock_quantity: 10,
            stock_status: StockStatus::InStock,
            specifications: specs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            compatibility_requirements: Default::default(),
            created_at: Utc::now(),
        }
    }

    fn catalog() -> InMemoryCatalog {
        let products = [
            product(
                "ryzen-5900x",
                Category::Cpu,
                449.99,
                &[("socket", SpecValue::Text("AM4".into()))],
            ),
            product(
                "b550-f",
                Category::Motherboard,
                189.99,
                &[
                    ("socket", SpecValue::Text("AM4".into())),
                    ("supported_memory", SpecValue::List(vec!["DDR4".into()])),
                ],
            ),
            product(
                "z790",
                Category::Motherboard,
                259.99,
                &[
                    ("socket", SpecValue::Text("LGA1700".into())),
                    ("supported_memory", SpecValue::List(vec!["DDR5".into()])),
                ],
            ),
            product(
                "rtx-4080",
                Category::Gpu,
                1199.0,
                &[("power_requirement", SpecValue::Number(320.0))],
            ),
            product(
                "psu-300",
                Category::Psu,
                39.99,
                &[("wattage", SpecValue::Number(300.0))],
            ),
        ];
        InMemoryCatalog(products.into_iter().map(|p| (p.id.clone(), p)).collect())
    }

    fn selection(pairs: &[(Category, &str)]) -> ComponentSelection {
        pairs.iter().map(|(c, id)| (*c, id.to_string())).collect()
    }

    #[tokio::test]
    async fn compatible_pair_is_priced() {
        let check = check_configuration(
            &catalog(),
            &selection(&[(Category::Cpu, "ryzen-5900x"), (Category::Motherboard, "b550-f")]),
        )
        .await
        .unwrap();
        assert!(check.compatible);
        assert!(check.issues.is_empty());
        assert!((check.total_price - 639.98).abs() < 1e-9);
    }

    #[tokio::test]
    async fn mismatched_socket_is_reported() {
        let check = check_configuration(
            &catalog(),
            &selection(&[(Category::Cpu, "ryzen-5900x"), (Category::Motherboard, "z790")]),
        )
        .await
        .unwrap();
        assert!(!check.compatible);
        assert_eq!(check.issues, vec![rules::CPU_SOCKET_ISSUE]);
    }

    #[tokio::test]
    async fn underpowered_psu_is_reported() {
        let check = check_configuration(
            &catalog(),
            &selection(&[(Category::Gpu, "rtx-4080"), (Category::Psu, "psu-300")]),
        )
        .await
        .unwrap();
        assert_eq!(check.issues, vec![rules::PSU_POWER_ISSUE]);
    }

    #[tokio::test]
    async fn missing_product_skips_its_rules() {
        let check = check_configuration(
            &catalog(),
            &selection(&[
                (Category::Cpu, "ryzen-5900x"),
                (Category::Motherboard, "non-existent-product-id"),
            ]),
        )
        .await
        .unwrap();
        assert!(check.compatible);
        assert!(check.issues.is_empty());
        assert!((check.total_price - 449.99).abs() < 1e-9);
    }

    #[tokio::test]
    async fn all_unknown_ids_are_vacuously_compatible() {
        let check = check_configuration(
            &catalog(),
            &selection(&[
                (Category::Cpu, "x"),
                (Category::Motherboard, "y"),
                (Category::Ram, "z"),
                (Category::Gpu, "w"),
                (Category::Psu, "v"),
            ]),
        )
        .await
        .unwrap();
        assert!(check.compatible);
        assert!(check.issues.is_empty());
        assert_eq!(check.total_price, 0.0);
    }

    #[tokio::test]
    async fn empty_selection_is_compatible_and_free() {
        let check = check_configuration(&catalog(), &ComponentSelection::new())
            .await
            .unwrap();
        assert!(check.compatible);
        assert_eq!(check.total_price, 0.0);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let result =
            check_configuration(&BrokenCatalog, &selection(&[(Category::Cpu, "ryzen-5900x")]))
                .await;
        assert!(matches!(result, Err(CatalogError::DbError(_))));
    }

    #[tokio::test]
    async fn resolve_skips_unknown_ids() {
        let resolved = resolve_components(
            &catalog(),
            &selection(&[(Category::Gpu, "rtx-4080"), (Category::Case, "missing")]),
        )
        .await
        .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[&Category::Gpu].id, "rtx-4080");
    }
}
