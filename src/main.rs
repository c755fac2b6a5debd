use spending_tracker::{
    config::{database, settings},
    core::{clock::SystemClock, guard::current_period},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file (non-fatal, env vars can be set externally)
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // 2. Load settings; the log level default comes from here
    let app_config = settings::load_app_config()?;

    // 3. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.logging.level)),
        )
        .init();
    info!(dotenv_loaded, "Loaded application settings.");

    // 4. Connect and make sure the schema exists
    let db = database::create_connection(&app_config.database.url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    info!(
        current_period = %current_period(&SystemClock),
        "Database ready; records before the current period are read-only."
    );

    db.close().await?;
    Ok(())
}
