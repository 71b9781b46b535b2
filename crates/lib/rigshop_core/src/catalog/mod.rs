//! Product catalog — products, filter definitions and query criteria.

pub mod compiler;
pub mod criteria;
pub mod filters;
pub mod queries;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::catalog::{Product, ProductInput};

/// Catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Point lookups against the product store.
///
/// A missing product is `Ok(None)`, never an error; only store failures
/// surface as `Err`.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn find_product(&self, id: &str) -> Result<Option<Product>, CatalogError>;
}

#[async_trait]
impl ProductLookup for PgPool {
    async fn find_product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        queries::get_product(self, id).await
    }
}

/// Reject product writes that would violate catalog invariants.
pub fn validate_product_input(input: &ProductInput) -> Result<(), CatalogError> {
    if input.name.trim().is_empty() {
        return Err(CatalogError::Validation("Product name is required".into()));
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(CatalogError::Validation(
            "Price must be a non-negative number".into(),
        ));
    }
    if input.stock_quantity < 0 {
        return Err(CatalogError::Validation(
            "Stock quantity must not be negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::Category;

    fn input(price: f64, stock_quantity: i32) -> ProductInput {
        ProductInput {
            name: "ASUS ROG STRIX B550-F".into(),
            category: Category::Motherboard,
            brand: "ASUS".into(),
            price,
            description: String::new(),
            image_base64: String::new(),
            stock_quantity,
            stock_status: None,
            specifications: Default::default(),
            compatibility_requirements: Default::default(),
        }
    }

    #[test]
    fn product_input_validation() {
        assert!(validate_product_input(&input(189.99, 8)).is_ok());
        assert!(validate_product_input(&input(0.0, 0)).is_ok());
        assert!(validate_product_input(&input(-1.0, 8)).is_err());
        assert!(validate_product_input(&input(f64::NAN, 8)).is_err());
        assert!(validate_product_input(&input(189.99, -2)).is_err());
    }
}
