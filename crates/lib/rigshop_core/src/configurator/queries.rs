//! Saved configuration persistence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use super::ConfiguratorError;
use crate::models::catalog::Category;
use crate::models::configurator::{ComponentSelection, ConfigurationCheck, PcConfiguration};
use crate::uuid::new_id;

const CONFIGURATION_COLUMNS: &str = "id, user_id, name, components, total_price, \
     compatibility_status, compatibility_issues, created_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConfigurationRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub components: Json<BTreeMap<String, String>>,
    pub total_price: f64,
    pub compatibility_status: bool,
    pub compatibility_issues: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ConfigurationRow> for PcConfiguration {
    type Error = ConfiguratorError;

    fn try_from(row: ConfigurationRow) -> Result<Self, Self::Error> {
        let components = row
            .components
            .0
            .into_iter()
            .map(|(category, id)| {
                let category = category.parse::<Category>().map_err(|e| {
                    ConfiguratorError::Corrupt(format!("configuration {}: {e}", row.id))
                })?;
                Ok((category, id))
            })
            .collect::<Result<ComponentSelection, ConfiguratorError>>()?;

        Ok(PcConfiguration {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            components,
            total_price: row.total_price,
            compatibility_status: row.compatibility_status,
            compatibility_issues: row.compatibility_issues.0,
            created_at: row.created_at,
        })
    }
}

/// Persist a build together with the verdict computed for it.
pub async fn save_configuration(
    pool: &PgPool,
    user_id: &str,
    name: &str,
    components: &ComponentSelection,
    check: &ConfigurationCheck,
) -> Result<PcConfiguration, ConfiguratorError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfiguratorError::Validation(
            "Configuration name is required".into(),
        ));
    }

    let stored: BTreeMap<&str, &str> = components
        .iter()
        .map(|(category, id)| (category.as_str(), id.as_str()))
        .collect();

    let row = sqlx::query_as::<_, ConfigurationRow>(&format!(
        "INSERT INTO pc_configurations \
         (id, user_id, name, components, total_price, compatibility_status, compatibility_issues) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {CONFIGURATION_COLUMNS}"
    ))
    .bind(new_id())
    .bind(user_id)
    .bind(name)
    .bind(Json(&stored))
    .bind(check.total_price)
    .bind(check.compatible)
    .bind(Json(&check.issues))
    .fetch_one(pool)
    .await?;

    PcConfiguration::try_from(row)
}

/// A user's saved builds, newest first.
pub async fn list_configurations(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<PcConfiguration>, ConfiguratorError> {
    let rows = sqlx::query_as::<_, ConfigurationRow>(&format!(
        "SELECT {CONFIGURATION_COLUMNS} FROM pc_configurations \
         WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(PcConfiguration::try_from).collect()
}
