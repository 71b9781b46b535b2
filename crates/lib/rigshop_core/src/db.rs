//! PostgreSQL pool setup and schema migrations.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tracing::info;

/// Default connection URL when none is configured.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/rigshop";

/// Maximum time to wait for a pooled connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while preparing the database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Result type for database setup.
pub type Result<T> = std::result::Result<T, DbError>;

/// Open a connection pool against `url`.
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool> {
    info!(max_connections, "opening database pool");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(url)
        .await?;
    Ok(pool)
}

/// Run all embedded migrations from `rigshop_core/migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    info!("running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Returns true when the database answers a trivial query.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
