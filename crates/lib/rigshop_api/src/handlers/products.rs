//! Product catalog handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use rigshop_core::catalog::compiler::{self, BaseQuery};
use rigshop_core::catalog::{filters, queries, validate_product_input};
use rigshop_core::models::catalog::{Product, ProductInput};
use tracing::{debug, info};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::MessageResponse;

/// `GET /api/products` — list products matching `category`, `search` and
/// any `filter_*` parameters of the active filter definitions.
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Product>>> {
    let base = BaseQuery {
        category: params.get("category").cloned(),
        search: params.get("search").cloned(),
    };
    let active = filters::list_active_filters(&state.pool).await?;
    let criteria = compiler::compile(&base, &active, &params);
    debug!(fields = criteria.fields.len(), search = ?criteria.search, "listing products");

    let products = queries::find_products(&state.pool, &criteria).await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = queries::get_product(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Json(product))
}

/// `POST /api/admin/products`
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(body): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    validate_product_input(&body)?;
    let product = queries::create_product(&state.pool, &body).await?;
    info!(product_id = %product.id, name = %product.name, "created product");
    Ok(Json(product))
}

/// `PUT /api/admin/products/{id}`
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProductInput>,
) -> AppResult<Json<MessageResponse>> {
    validate_product_input(&body)?;
    if !queries::update_product(&state.pool, &id, &body).await? {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// `DELETE /api/admin/products/{id}`
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !queries::delete_product(&state.pool, &id).await? {
        return Err(AppError::NotFound("Product not found".into()));
    }
    info!(product_id = %id, "deleted product");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
