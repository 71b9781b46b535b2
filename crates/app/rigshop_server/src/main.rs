//! Rigshop API server binary.
//!
//! Connects to PostgreSQL, applies migrations, seeds a fresh catalog and
//! serves the REST API until interrupted.

use clap::Parser;
use rigshop_api::config::ApiConfig;
use rigshop_core::db::DEFAULT_DATABASE_URL;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "rigshop_server", about = "Rigshop API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8001")]
    bind_addr: String,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 10)]
    max_connections: u32,

    /// Password accepted by the admin login endpoint.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Skip inserting sample products into an empty catalog.
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rigshop_api=debug,rigshop_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    info!(bind_addr = %args.bind_addr, "starting rigshop_server");

    let pool = rigshop_core::db::connect(&args.database_url, args.max_connections).await?;
    rigshop_core::db::migrate(&pool).await?;

    if !args.no_seed && rigshop_core::seed::seed_if_empty(&pool).await? {
        info!("empty catalog seeded with sample data");
    }

    let admin_password = args.admin_password.filter(|p| !p.is_empty());
    if admin_password.is_none() {
        warn!("ADMIN_PASSWORD not set; admin login is disabled");
    }

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        pg_connection_url: args.database_url,
        admin_password,
        ..ApiConfig::from_env()
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let app = rigshop_api::router(rigshop_api::AppState { pool, config });

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    Ok(())
}
