//! PC configurator handlers.

use axum::Json;
use axum::extract::State;
use rigshop_core::configurator::{self, queries};
use rigshop_core::models::catalog::Category;
use rigshop_core::models::configurator::{ComponentSelection, ConfigurationCheck, PcConfiguration};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::SaveConfigurationRequest;

/// `GET /api/configurator/categories` — component slots in build order.
pub async fn categories_handler() -> Json<Vec<Category>> {
    Json(Category::ALL.to_vec())
}

/// `POST /api/configurator/validate`
pub async fn validate_handler(
    State(state): State<AppState>,
    Json(components): Json<ComponentSelection>,
) -> AppResult<Json<ConfigurationCheck>> {
    let check = configurator::check_configuration(&state.pool, &components).await?;
    Ok(Json(check))
}

/// `POST /api/configurator/save`
pub async fn save_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Json(body): Json<SaveConfigurationRequest>,
) -> AppResult<Json<PcConfiguration>> {
    let check = configurator::check_configuration(&state.pool, &body.components).await?;
    let saved =
        queries::save_configuration(&state.pool, &user.0.sub, &body.name, &body.components, &check)
            .await?;
    info!(
        config_id = %saved.id,
        compatible = saved.compatibility_status,
        "saved configuration"
    );
    Ok(Json(saved))
}

/// `GET /api/configurator/my-configs`
pub async fn my_configs_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<PcConfiguration>>> {
    Ok(Json(
        queries::list_configurations(&state.pool, &user.0.sub).await?,
    ))
}
