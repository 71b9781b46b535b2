//! Product persistence and criteria rendering.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::CatalogError;
use super::criteria::{Constraint, Criteria, DocumentColumn, FieldPath, Scalar};
use crate::models::catalog::{Product, ProductInput, Specifications, StockStatus};
use crate::uuid::new_id;

/// Upper bound on rows returned by a listing query.
pub const LISTING_LIMIT: i64 = 1000;

const PRODUCT_COLUMNS: &str = "id, name, category, brand, price, description, image_base64, \
     stock_quantity, stock_status, specifications, compatibility_requirements, created_at";

/// Row returned by product queries.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub description: String,
    pub image_base64: String,
    pub stock_quantity: i32,
    pub stock_status: String,
    pub specifications: Json<Specifications>,
    pub compatibility_requirements: Json<BTreeMap<String, Value>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = CatalogError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|e| CatalogError::Corrupt(format!("product {}: {e}", row.id)))?;
        Ok(Product {
            id: row.id,
            name: row.name,
            category,
            brand: row.brand,
            price: row.price,
            description: row.description,
            image_base64: row.image_base64,
            stock_quantity: row.stock_quantity,
            stock_status: StockStatus::from_db(&row.stock_status),
            specifications: row.specifications.0,
            compatibility_requirements: row.compatibility_requirements.0,
            created_at: row.created_at,
        })
    }
}

/// Fetch a single product by id.
pub async fn get_product(pool: &PgPool, id: &str) -> Result<Option<Product>, CatalogError> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(Product::try_from).transpose()
}

/// Fetch every product matching `criteria`, oldest first.
pub async fn find_products(
    pool: &PgPool,
    criteria: &Criteria,
) -> Result<Vec<Product>, CatalogError> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
    push_criteria(&mut qb, criteria);
    qb.push(" ORDER BY created_at, id LIMIT ").push_bind(LISTING_LIMIT);

    let rows = qb.build_query_as::<ProductRow>().fetch_all(pool).await?;
    rows.into_iter().map(Product::try_from).collect()
}

/// Insert a product, deriving its stock status.
pub async fn create_product(pool: &PgPool, input: &ProductInput) -> Result<Product, CatalogError> {
    let row = sqlx::query_as::<_, ProductRow>(&format!(
        "INSERT INTO products (id, name, category, brand, price, description, image_base64, \
         stock_quantity, stock_status, specifications, compatibility_requirements) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(new_id())
    .bind(&input.name)
    .bind(input.category.as_str())
    .bind(&input.brand)
    .bind(input.price)
    .bind(&input.description)
    .bind(&input.image_base64)
    .bind(input.stock_quantity)
    .bind(input.stock_status().as_str())
    .bind(Json(&input.specifications))
    .bind(Json(&input.compatibility_requirements))
    .fetch_one(pool)
    .await?;
    Product::try_from(row)
}

/// Replace a product's fields. Returns `false` when no product has `id`.
pub async fn update_product(
    pool: &PgPool,
    id: &str,
    input: &ProductInput,
) -> Result<bool, CatalogError> {
    let result = sqlx::query(
        "UPDATE products SET name = $2, category = $3, brand = $4, price = $5, \
         description = $6, image_base64 = $7, stock_quantity = $8, stock_status = $9, \
         specifications = $10, compatibility_requirements = $11 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&input.name)
    .bind(input.category.as_str())
    .bind(&input.brand)
    .bind(input.price)
    .bind(&input.description)
    .bind(&input.image_base64)
    .bind(input.stock_quantity)
    .bind(input.stock_status().as_str())
    .bind(Json(&input.specifications))
    .bind(Json(&input.compatibility_requirements))
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a product. Returns `false` when no product has `id`.
pub async fn delete_product(pool: &PgPool, id: &str) -> Result<bool, CatalogError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Count all products.
pub async fn product_count(pool: &PgPool) -> Result<i64, CatalogError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Append `criteria` as a `WHERE` clause.
pub fn push_criteria(qb: &mut QueryBuilder<'_, Postgres>, criteria: &Criteria) {
    qb.push(" WHERE TRUE");
    if let Some(search) = &criteria.search {
        qb.push(" AND name ILIKE ").push_bind(like_pattern(search));
    }
    for (path, constraint) in &criteria.fields {
        qb.push(" AND ");
        push_constraint(qb, &FieldPath::parse(path), constraint);
    }
}

fn push_constraint(qb: &mut QueryBuilder<'_, Postgres>, path: &FieldPath, constraint: &Constraint) {
    match (path, constraint) {
        (FieldPath::Column(column), Constraint::Equals(Scalar::Text(text)))
            if !column.is_numeric() =>
        {
            qb.push(column.sql_name()).push(" = ").push_bind(text.clone());
        }
        (FieldPath::Column(column), Constraint::Equals(Scalar::Number(n))) if column.is_numeric() => {
            qb.push(column.sql_name()).push("::float8 = ").push_bind(*n);
        }
        (FieldPath::Column(column), Constraint::Range { min, max }) if column.is_numeric() => {
            qb.push("(");
            push_bounds(qb, *min, *max, |qb| {
                qb.push(column.sql_name()).push("::float8");
            });
            qb.push(")");
        }
        (FieldPath::Document { column, keys }, Constraint::Equals(scalar)) => {
            let value = Json(scalar.to_json());
            qb.push("(");
            push_document(qb, *column, keys);
            qb.push(" = ").push_bind(value.clone());
            qb.push(" OR (jsonb_typeof(");
            push_document(qb, *column, keys);
            qb.push(") = 'array' AND ");
            push_document(qb, *column, keys);
            qb.push(" @> jsonb_build_array(").push_bind(value).push(")))");
        }
        (FieldPath::Document { column, keys }, Constraint::Range { min, max }) => {
            qb.push("(");
            push_bounds(qb, *min, *max, |qb| {
                qb.push("(CASE WHEN jsonb_typeof(");
                push_document(qb, *column, keys);
                qb.push(") = 'number' THEN (");
                push_document(qb, *column, keys);
                qb.push(")::float8 END)");
            });
            qb.push(")");
        }
        // Type mismatches and unknown paths never match.
        _ => {
            qb.push("FALSE");
        }
    }
}

fn push_document(qb: &mut QueryBuilder<'_, Postgres>, column: DocumentColumn, keys: &[String]) {
    qb.push(column.sql_name())
        .push(" #> ")
        .push_bind(keys.to_vec());
}

fn push_bounds<F>(qb: &mut QueryBuilder<'_, Postgres>, min: Option<f64>, max: Option<f64>, expr: F)
where
    F: Fn(&mut QueryBuilder<'_, Postgres>),
{
    let mut first = true;
    if let Some(min) = min {
        expr(qb);
        qb.push(" >= ").push_bind(min);
        first = false;
    }
    if let Some(max) = max {
        if !first {
            qb.push(" AND ");
        }
        expr(qb);
        qb.push(" <= ").push_bind(max);
        first = false;
    }
    if first {
        qb.push("TRUE");
    }
}

/// `%text%` with LIKE metacharacters escaped.
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(criteria: &Criteria) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT id FROM products");
        push_criteria(&mut qb, criteria);
        qb.sql().to_string()
    }

    #[test]
    fn empty_criteria_renders_tautology() {
        assert_eq!(rendered(&Criteria::new()), "SELECT id FROM products WHERE TRUE");
    }

    #[test]
    fn search_renders_name_only_ilike() {
        let criteria = Criteria {
            search: Some("AMD".into()),
            ..Default::default()
        };
        let sql = rendered(&criteria);
        assert!(sql.contains("name ILIKE $1"));
        assert!(!sql.contains("brand"));
        assert!(!sql.contains("description"));
    }

    #[test]
    fn column_constraints_render_typed_comparisons() {
        let mut criteria = Criteria::new();
        criteria.set("brand", Constraint::Equals(Scalar::Text("AMD".into())));
        criteria.set(
            "price",
            Constraint::Range {
                min: Some(100.0),
                max: Some(500.0),
            },
        );
        let sql = rendered(&criteria);
        assert!(sql.contains("brand = $1"));
        assert!(sql.contains("(price::float8 >= $2 AND price::float8 <= $3)"));
    }

    #[test]
    fn mismatched_and_unknown_paths_render_false() {
        let mut criteria = Criteria::new();
        criteria.set("price", Constraint::Equals(Scalar::Text("cheap".into())));
        criteria.set("weight", Constraint::Equals(Scalar::Number(1.0)));
        let sql = rendered(&criteria);
        assert_eq!(sql.matches("FALSE").count(), 2);
    }

    #[test]
    fn document_constraints_use_json_paths() {
        let mut criteria = Criteria::new();
        criteria.set(
            "specifications.color",
            Constraint::Equals(Scalar::Text("black".into())),
        );
        criteria.set(
            "specifications.wattage",
            Constraint::Range {
                min: None,
                max: Some(750.0),
            },
        );
        let sql = rendered(&criteria);
        assert!(sql.contains("specifications #> $1 = $2"));
        assert!(sql.contains("jsonb_build_array("));
        assert!(sql.contains("jsonb_typeof(specifications #> "));
        assert!(sql.contains("::float8 END) <= "));
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("RTX"), "%RTX%");
        assert_eq!(like_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }
}
