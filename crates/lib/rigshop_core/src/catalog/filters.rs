//! Filter definition persistence.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use super::CatalogError;
use crate::models::filter::{FilterDefinition, FilterInput, FilterKind};
use crate::uuid::new_id;

const FILTER_COLUMNS: &str = "id, name, kind, field, filter_values, active, created_at";

/// Row returned by filter queries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FilterRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub field: String,
    pub filter_values: Json<Vec<String>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<FilterRow> for FilterDefinition {
    fn from(row: FilterRow) -> Self {
        FilterDefinition {
            id: row.id,
            name: row.name,
            kind: FilterKind::from(row.kind),
            field: row.field,
            values: row.filter_values.0,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

/// Reject inputs the compiler could never use.
pub fn validate_input(input: &FilterInput) -> Result<(), CatalogError> {
    if input.name.trim().is_empty() {
        return Err(CatalogError::Validation("Filter name is required".into()));
    }
    if input.field.trim().is_empty() {
        return Err(CatalogError::Validation("Filter field is required".into()));
    }
    if !input.kind.is_known() {
        return Err(CatalogError::Validation(format!(
            "Unknown filter type '{}'; expected select, range or boolean",
            input.kind.as_str()
        )));
    }
    Ok(())
}

/// All filter definitions in admin-defined (creation) order.
pub async fn list_filters(pool: &PgPool) -> Result<Vec<FilterDefinition>, CatalogError> {
    let rows = sqlx::query_as::<_, FilterRow>(&format!(
        "SELECT {FILTER_COLUMNS} FROM product_filters ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(FilterDefinition::from).collect())
}

/// Active filter definitions in admin-defined order.
pub async fn list_active_filters(pool: &PgPool) -> Result<Vec<FilterDefinition>, CatalogError> {
    let rows = sqlx::query_as::<_, FilterRow>(&format!(
        "SELECT {FILTER_COLUMNS} FROM product_filters WHERE active ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(FilterDefinition::from).collect())
}

/// Create a filter definition (active by default).
pub async fn create_filter(
    pool: &PgPool,
    input: &FilterInput,
) -> Result<FilterDefinition, CatalogError> {
    validate_input(input)?;
    let row = sqlx::query_as::<_, FilterRow>(&format!(
        "INSERT INTO product_filters (id, name, kind, field, filter_values) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {FILTER_COLUMNS}"
    ))
    .bind(new_id())
    .bind(input.name.trim())
    .bind(input.kind.as_str())
    .bind(input.field.trim())
    .bind(Json(&input.values))
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

/// Replace a filter definition's name, kind, field and values.
pub async fn update_filter(
    pool: &PgPool,
    id: &str,
    input: &FilterInput,
) -> Result<bool, CatalogError> {
    validate_input(input)?;
    let result = sqlx::query(
        "UPDATE product_filters SET name = $2, kind = $3, field = $4, filter_values = $5 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(input.name.trim())
    .bind(input.kind.as_str())
    .bind(input.field.trim())
    .bind(Json(&input.values))
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Show or hide a filter from the storefront and the compiler.
pub async fn set_filter_active(pool: &PgPool, id: &str, active: bool) -> Result<bool, CatalogError> {
    let result = sqlx::query("UPDATE product_filters SET active = $2 WHERE id = $1")
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_filter(pool: &PgPool, id: &str) -> Result<bool, CatalogError> {
    let result = sqlx::query("DELETE FROM product_filters WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, kind: &str, field: &str) -> FilterInput {
        FilterInput {
            name: name.into(),
            kind: FilterKind::from(kind.to_string()),
            field: field.into(),
            values: vec![],
        }
    }

    #[test]
    fn accepts_known_kinds() {
        for kind in ["select", "range", "boolean"] {
            assert!(validate_input(&input("Prix", kind, "price")).is_ok());
        }
    }

    #[test]
    fn rejects_unknown_kind_and_blank_fields() {
        assert!(matches!(
            validate_input(&input("Prix", "slider", "price")),
            Err(CatalogError::Validation(_))
        ));
        assert!(validate_input(&input("  ", "select", "brand")).is_err());
        assert!(validate_input(&input("Marque", "select", "")).is_err());
    }
}
