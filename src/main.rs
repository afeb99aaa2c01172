//! Bootstrap binary: prepares the engine's store and reports readiness.
//!
//! The presentation layer (admin UI, reporting) lives outside this crate and
//! consumes the library; this binary initializes logging, loads the engine
//! tuning, and creates the database schema.

#![allow(clippy::result_large_err)]

use shiftpay::errors::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing as early as possible
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    let config = shiftpay::config::rules::load_default_config()?;
    info!(
        late_grace = config.rules.late_grace_minutes,
        undertime_grace = config.rules.undertime_grace_minutes,
        overtime_threshold = config.rules.overtime_threshold_minutes,
        standard_monthly_hours = config.rules.standard_monthly_hours,
        "engine tuning loaded"
    );

    let db = shiftpay::config::database::create_connection().await?;
    shiftpay::config::database::create_tables(&db).await?;
    info!(
        url = %shiftpay::config::database::get_database_url(),
        "payroll store ready"
    );

    Ok(())
}
