//! Sample catalog data for a fresh database.

use std::collections::BTreeMap;

use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::cart::{CartError, promo};
use crate::catalog::{CatalogError, queries};
use crate::models::catalog::{Category, ProductInput, SpecValue, Specifications};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

fn specs(pairs: Vec<(&str, SpecValue)>) -> Specifications {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn text(s: &str) -> SpecValue {
    SpecValue::Text(s.to_string())
}

/// The starter products: an AM4 CPU and a matching motherboard.
pub fn sample_products() -> Vec<ProductInput> {
    vec![
        ProductInput {
            name: "AMD Ryzen 9 5900X".into(),
            category: Category::Cpu,
            brand: "AMD".into(),
            price: 449.99,
            description: "12-core, 24-thread processor with exceptional gaming and content \
                          creation performance"
                .into(),
            image_base64: String::new(),
            stock_quantity: 15,
            stock_status: None,
            specifications: specs(vec![
                ("cores", SpecValue::Number(12.0)),
                ("threads", SpecValue::Number(24.0)),
                ("base_clock", text("3.7 GHz")),
                ("boost_clock", text("4.8 GHz")),
                ("socket", text("AM4")),
            ]),
            compatibility_requirements: BTreeMap::from([(
                "socket".to_string(),
                Value::String("AM4".into()),
            )]),
        },
        ProductInput {
            name: "ASUS ROG STRIX B550-F".into(),
            category: Category::Motherboard,
            brand: "ASUS".into(),
            price: 189.99,
            description: "ATX motherboard with PCIe 4.0 support and robust VRM design".into(),
            image_base64: String::new(),
            stock_quantity: 8,
            stock_status: None,
            specifications: specs(vec![
                ("form_factor", text("ATX")),
                ("socket", text("AM4")),
                ("supported_memory", SpecValue::List(vec!["DDR4".into()])),
                ("memory_slots", SpecValue::Number(4.0)),
                ("max_memory", text("128GB")),
            ]),
            compatibility_requirements: BTreeMap::new(),
        },
    ]
}

/// Insert sample products and the `GAMING10` code when the catalog is empty.
///
/// Returns whether anything was inserted.
pub async fn seed_if_empty(pool: &PgPool) -> Result<bool, SeedError> {
    if queries::product_count(pool).await? > 0 {
        return Ok(false);
    }

    for input in sample_products() {
        let product = queries::create_product(pool, &input).await?;
        info!(product_id = %product.id, name = %product.name, "seeded sample product");
    }

    match promo::create_promo_code(pool, "GAMING10", 10.0).await {
        Ok(_) | Err(CartError::Conflict(_)) => {}
        Err(e) => return Err(e.into()),
    }
    info!("seeded sample data");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::validate_product_input;
    use crate::configurator::validate;
    use crate::models::catalog::StockStatus;

    #[test]
    fn sample_products_are_valid_and_in_stock() {
        for input in sample_products() {
            assert!(validate_product_input(&input).is_ok());
            assert_eq!(input.stock_status(), StockStatus::InStock);
        }
    }

    #[test]
    fn sample_build_is_compatible() {
        let resolved = sample_products()
            .into_iter()
            .map(|p| (p.category, p.specifications))
            .collect();
        assert!(validate(&resolved).compatible);
    }
}
