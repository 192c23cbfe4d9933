//! Installer: creates the schema and seeds it from the `populador/` files.
//!
//! Pass `--reset` to drop every table before recreating it.

use dotenvy::dotenv;
use std::{env, path::Path};
use stockroom::{
    config::{self, database},
    errors::Result,
    populator,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Creates the directory holding a file-backed `SQLite` database.
fn ensure_database_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or_default();
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;
    let reset = env::args().skip(1).any(|arg| arg == "--reset");

    // 4. Connect and prepare the schema
    ensure_database_dir(&app_config.database_url)?;
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Connected to {}", app_config.database_url))
        .inspect_err(|e| error!("Failed to connect: {}", e))?;

    if reset {
        warn!("Dropping every table before installing");
        database::drop_tables(&db).await?;
    }
    database::create_tables(&db).await?;

    // 5. Seed the tables
    let report = populator::populate_all(&db, &app_config.populator)
        .await
        .inspect_err(|e| error!("Installation failed: {}", e))?;
    info!(
        "Installation complete: {} client(s), {} employee(s), {} supplier(s), {} categories, {} product(s), {} sale(s), {} user(s)",
        report.clients,
        report.employees,
        report.suppliers,
        report.categories,
        report.products,
        report.sales,
        report.users
    );

    db.close().await?;
    Ok(())
}
